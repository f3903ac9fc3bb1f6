mod persistence;
mod resolution;
mod traits;
mod unresolve;
