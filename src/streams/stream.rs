use crate::core::instance_header::InstanceHeader;
use crate::core::instances::Instance;
use crate::error::Result;

pub trait Stream: Send {
    fn header(&self) -> &InstanceHeader;

    fn has_more_instances(&self) -> bool;

    fn next_instance(&mut self) -> Option<Box<dyn Instance>>;

    /// Rewinds to the first instance; generators replay the same sequence.
    fn restart(&mut self) -> Result<()>;
}
