//! Problem instances for the npbench benchmark harness and their seeded generation.

/// Shortcut for tests
#[cfg(any(test, feature = "internal-testing"))]
#[doc(hidden)]
#[macro_export]
macro_rules! lit {
    ($x:expr) => {
        $crate::lit::Lit::from_dimacs($x)
    };
}

/// Shortcut for tests
#[cfg(any(test, feature = "internal-testing"))]
#[doc(hidden)]
#[macro_export]
macro_rules! lits {
    ( $( $x:expr ),* ) => { [ $( $crate::lit!( $x ) ),* ] };
    ( $( $x:expr ),* , ) => { $crate::lits! [ $( $ x),* ] };
}

/// Shortcut for tests
#[cfg(any(test, feature = "internal-testing"))]
#[doc(hidden)]
#[macro_export]
macro_rules! cnf3 {
    ( $( $a:expr, $b:expr, $c:expr );* ; ) => {
        $crate::cnf::ThreeCnf::from(vec![ $( $crate::lits![ $a, $b, $c ] ),* ])
    };
}

pub mod cnf;
pub mod generate;
pub mod graph;
pub mod knapsack;
pub mod lit;
pub mod point;

#[cfg(any(test, feature = "internal-testing"))]
pub mod test;

pub use cnf::{Clause3, ThreeCnf};
pub use generate::Generator;
pub use graph::{Edge, Graph};
pub use knapsack::{Item, KnapsackInstance};
pub use lit::{Lit, Var};
pub use point::Point;
