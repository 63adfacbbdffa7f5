mod test_trim_basic;
