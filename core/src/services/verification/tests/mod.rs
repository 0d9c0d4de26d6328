
mod phone_leg_tests;
