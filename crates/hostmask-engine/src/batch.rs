use hostmask_core::StatusCode;

pub(crate) struct BatchRun {
    total: usize,
    executed: usize,
    failed: usize,
}

impl BatchRun {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            executed: 0,
            failed: 0,
        }
    }

    pub fn next_percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        ((self.executed * 100) / self.total) as u8
    }

    pub fn record(&mut self, code: StatusCode) {
        self.executed += 1;
        if !code.is_success() {
            self.failed += 1;
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn outcome(&self) -> StatusCode {
        if self.failed == 0 {
            StatusCode::Success
        } else {
            StatusCode::Failure
        }
    }
}
