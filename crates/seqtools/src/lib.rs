//! Lazy Sequence Combinators
//!
//! Pull-based, single-pass combinators over any `Iterator`, in the spirit of
//! Python's `itertools`.
//!
//! ## Philosophy
//!
//! - **Nothing runs until pulled**: building a pipeline reads no input
//! - **End is not an error**: `None` ends a sequence; `SeqError` is for bad arguments
//! - **Ended stays ended**: every returned iterator is fused
//! - **Order is contract**: product-family output is lexicographic in pool order
//!
//! ## Core Design
//!
//! ```text
//! Sequence (Indexed | Iter) → SeqIter → combinators → stateful → consumers
//!                                          ↓              ↓
//!                                   map/filter/...   product/group_by/tee/cycle
//! ```

pub mod combinators;
pub mod config;
pub mod consumers;
pub mod cycle;
pub mod error;
pub mod ext;
pub mod group_by;
pub mod product;
pub mod source;
pub mod tee;
pub mod utils;

pub use combinators::{
    accumulate, chain, chain_from_iterable, compress, consume, drop_while, enumerate, filter,
    filter_false, limit, map, slice, star_map, take_while, unique, zip, zip_longest,
};
pub use config::SeqConfig;
pub use consumers::{equals, every, for_each, join, next_or_value, reduce, some, to_array};
pub use cycle::{cycle, Cycle};
pub use error::{Result, SeqError};
pub use ext::SeqExt;
pub use group_by::{group_by, group_by_value, GroupBy};
pub use product::{
    combinations, combinations_checked, combinations_with_replacement,
    combinations_with_replacement_checked, permutations, permutations_checked, product,
    product_checked, product_repeat, Product,
};
pub use source::{
    count, indexed, pull, range, repeat, IndexedCollection, SeqIter, Sequence, Sparse,
};
pub use tee::{tee, tee_checked, TeeBranch};
pub use utils::Truthy;

pub mod prelude {
    //! Traits needed for method-style pipelines
    pub use crate::ext::SeqExt;
    pub use crate::source::IndexedCollection;
    pub use crate::utils::Truthy;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_and_method_forms_agree() {
        let free = to_array(limit(filter_false(count(1, 1), |x| *x % 2 == 0), 3));
        let method = count(1, 1).filter_false(|x| *x % 2 == 0).limit(3).to_array();
        assert_eq!(free, method);
        assert_eq!(method, vec![1, 3, 5]);
    }
}
