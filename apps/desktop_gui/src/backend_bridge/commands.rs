//! Backend commands queued from UI to the advisory worker.

pub enum BackendCommand {
    RequestOrganicGuidance { crop: String },
    RequestYieldOptimization { crop: String },
    RequestDiseaseSolution,
    AskAdvisor { message: String },
    UpdateDetections { entries: Vec<String> },
}
