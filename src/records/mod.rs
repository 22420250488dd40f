pub mod flow_record;
pub mod lookup_record;
