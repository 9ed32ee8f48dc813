use std::fmt;

/// Steps an analysis request moves through, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    ReceivingInput,
    Extracting,
    Normalizing,
    Classifying,
    Done,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::ReceivingInput => "receiving_input",
            PipelineStage::Extracting => "extracting",
            PipelineStage::Normalizing => "normalizing",
            PipelineStage::Classifying => "classifying",
            PipelineStage::Done => "done",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
