pub type DemoId = String;
pub type LeadId = String;
pub type UserId = String;
/// Monotonic tag attached to each issued conflict check.
pub type RequestSeq = u64;
pub type SubscriptionId = usize;
