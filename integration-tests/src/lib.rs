mod test_binary;
pub use test_binary::test_binary_main;
