mod channel_tests;
