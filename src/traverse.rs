//! Tree traversals.

mod ancestors;
mod children;
mod depth_first;

pub use self::ancestors::AncestorsTraverser;
pub use self::children::ChildrenTraverser;
pub use self::depth_first::{
    DepthFirstTraverser, DftEvent, EdgesTraverser, LeavesTraverser, PreorderTraverser,
    ReverseDepthFirstTraverser, ReverseLeavesTraverser,
};
