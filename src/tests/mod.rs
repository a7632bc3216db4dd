mod test_regional_yield;
