//! End-to-end flows through the overlay controller and runtime, driven by
//! the recording clock and bridge from `common::mocks`.

mod runtime;
mod visibility;
