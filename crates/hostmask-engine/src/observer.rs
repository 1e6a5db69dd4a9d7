use hostmask_core::Severity;

pub type ProgressFn = Box<dyn Fn(&str, u8)>;
pub type LogFn = Box<dyn Fn(&str, Severity)>;

#[derive(Default)]
pub struct Observers {
    progress: Option<ProgressFn>,
    log: Option<LogFn>,
}

impl Observers {
    pub fn set_progress(&mut self, observer: Option<ProgressFn>) {
        self.progress = observer;
    }

    pub fn set_log(&mut self, observer: Option<LogFn>) {
        self.log = observer;
    }

    pub fn report_progress(&self, message: &str, percent: u8) {
        if let Some(observer) = &self.progress {
            observer(message, percent);
        }
    }

    pub fn log(&self, message: &str, severity: Severity) {
        if let Some(observer) = &self.log {
            observer(message, severity);
        }
    }
}
