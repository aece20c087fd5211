pub mod keep_signed_token;
pub mod request_token;
pub mod user;

/*
 Users own nothing here except their row. Both token tables point back at a
 user_id but deletion policy is left to whoever owns user offboarding; the
 managers never cascade.
 Keep-signed tokens are the "remember me" bearer pairs, request tokens are the
 one-shot mailed links (password reset, email verify, ...).
 */
