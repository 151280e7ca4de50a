mod compile_test;
mod errors_test;
mod properties_test;
mod snapshot_test;
