mod grace_period_tests;
