//! Shared map fixtures for the benchmarks in this crate.

use cave_core::World;

/// A modestly sized map with rocks, lambdas, and a beard patch, used as
/// the representative workload for both benchmarks.
pub fn reference_map() -> World {
    let input = b"\
######################
#R  *  \\  \\   *      #
#  ***  ####   W  W   #
#   \\      *   WWW    #
#  *   ###      W     #
#      #\\#    *       #
#      #.#  \\       * #
#      ###            #
#  *      \\   L       #
######################

Water 0
Flooding 0
Waterproof 10
Growth 25
Razors 0
";
    cave_core::parse(input).expect("fixture map parses")
}
