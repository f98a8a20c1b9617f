/// Output artifact format tests.
pub mod output;
