mod bar;
mod symbol;

pub use bar::{iso_date, Bar, BarSeries};
pub use symbol::Symbol;
