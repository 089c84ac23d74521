pub mod ip_info;
pub mod recaptcha;
