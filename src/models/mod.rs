//! Views over upstream records and inbound query types.

pub mod record;
pub mod referral;
