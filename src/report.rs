use std::io::Write;

const RULE_WIDTH: usize = 60;

/// Human-readable status lines for an operator's terminal. Write failures
/// are ignored.
pub struct Reporter<W: Write> {
    out: W,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn banner(&mut self, title: &str) {
        self.emit(&"=".repeat(RULE_WIDTH));
        self.emit(title);
        self.emit(&"=".repeat(RULE_WIDTH));
    }

    pub fn section(&mut self, icon: &str, title: &str) {
        self.emit("");
        self.emit(&format!("{icon} {title}"));
        self.emit(&"-".repeat(RULE_WIDTH));
    }

    pub fn ok(&mut self, msg: impl AsRef<str>) {
        self.emit(&format!("✅ {}", msg.as_ref()));
    }

    pub fn fail(&mut self, msg: impl AsRef<str>) {
        self.emit(&format!("❌ {}", msg.as_ref()));
    }

    pub fn warn(&mut self, msg: impl AsRef<str>) {
        self.emit(&format!("⚠️  {}", msg.as_ref()));
    }

    pub fn info(&mut self, msg: impl AsRef<str>) {
        self.emit(&format!("ℹ️  {}", msg.as_ref()));
    }

    /// Indented follow-up line under the previous status.
    pub fn detail(&mut self, msg: impl AsRef<str>) {
        self.emit(&format!("   {}", msg.as_ref()));
    }

    pub fn blank(&mut self) {
        self.emit("");
    }

    pub fn flush(&mut self) {
        let _ = self.out.flush();
    }

    fn emit(&mut self, line: &str) {
        let _ = writeln!(self.out, "{line}");
    }
}
