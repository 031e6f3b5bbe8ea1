pub use self::{history::*, snapshot::*, unit::*};

pub(crate) mod history;
pub(crate) mod snapshot;
pub(crate) mod unit;
