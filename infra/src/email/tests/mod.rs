mod console_email_tests;
