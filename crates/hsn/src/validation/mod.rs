//! HSN code validation.
//!
//! Each code goes through three checks:
//!
//! 1. **Format**: 2, 4, 6 or 8 ASCII digits
//! 2. **Existence**: exact match in the reference table
//! 3. **Hierarchy**: on a miss, the nearest existing ancestor is reported
//!
//! Problems with individual codes are captured in their
//! [`ValidationResult`]; a batch never fails as a whole.

mod result;
mod validator;

pub use result::{CodeError, ValidationResult};
pub use validator::{Validator, split_codes};
