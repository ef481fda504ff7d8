mod filesystem_test;
mod fixture_test;
