/// Key for one of the two durable artifacts of the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKey {
    ResumeText,
    JobDescription,
}

/// Session-scoped cache bridging the independently navigable stages.
///
/// Last write wins; there is no expiry and no undo. The store is the sole
/// long-lived owner of the extracted resume text and the job-description
/// text, and `commit_pair` is the only multi-key write, so a reader can
/// never observe a torn pair.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WorkflowStore {
    resume_text: Option<String>,
    job_description: Option<String>,
    revision: u64,
}

impl WorkflowStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unconditionally overwrites the value under `key`.
    pub fn put(&mut self, key: StoreKey, value: String) {
        match key {
            StoreKey::ResumeText => self.resume_text = Some(value),
            StoreKey::JobDescription => self.job_description = Some(value),
        }
        self.revision += 1;
    }

    /// Returns the stored value, or `None` if nothing has been committed.
    pub fn get(&self, key: StoreKey) -> Option<&str> {
        match key {
            StoreKey::ResumeText => self.resume_text.as_deref(),
            StoreKey::JobDescription => self.job_description.as_deref(),
        }
    }

    /// Commits both texts in one step so no reader sees a mixed pair.
    pub fn commit_pair(&mut self, resume_text: String, job_description: String) {
        self.resume_text = Some(resume_text);
        self.job_description = Some(job_description);
        self.revision += 1;
    }

    /// Drops both entries. Only explicit user action calls this.
    pub fn clear(&mut self) {
        self.resume_text = None;
        self.job_description = None;
        self.revision += 1;
    }

    /// Monotonic counter bumped by every mutation; lets the shell decide
    /// when the session needs persisting without diffing contents.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}
