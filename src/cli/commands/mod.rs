//! Command implementations

mod check;
mod files;
mod init;
mod run;

pub use check::check;
pub use files::files;
pub use init::init;
pub use run::run;
