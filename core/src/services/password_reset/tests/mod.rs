//! Tests for the password reset service
