pub mod key;
pub mod numeric;
pub mod record;
pub mod source;
pub mod table;

pub use key::RestockKey;
pub use numeric::lenient_quantity;
pub use record::{
    Decision, REMARK_CENTRAL_CONSTRAINT, REMARK_LOW_COVER, REMARK_OVERSTOCK, RestockRecord,
};
pub use source::SourceKind;
pub use table::Table;
