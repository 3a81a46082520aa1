mod census;
mod common;
