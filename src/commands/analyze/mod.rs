mod aggregate;
mod document;
mod extremal;
mod loader;
mod report;
mod run;
mod selection;
mod thresholds;

pub(crate) use run::run;
