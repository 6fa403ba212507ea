pub mod basic_slotgrant;
pub mod channel_allocation;
