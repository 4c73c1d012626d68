//! ERP terminal collaborator. The statement pipeline itself never talks to
//! the terminal; it only consumes the exported grid file produced by
//! `extract_trial_balance`.

use std::path::{Path, PathBuf};

use crate::error::{CloseoutError, Result};
use crate::settings::Settings;

/// Virtual keys understood by the ERP GUI session.
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VKey {
    Enter,
    Back,
    Refresh,
    Execute,
    Save,
}

impl VKey {
    /// GUI scripting key code.
    #[allow(dead_code)]
    pub fn code(&self) -> u16 {
        match self {
            VKey::Enter => 0,
            VKey::Back => 3,
            VKey::Refresh => 5,
            VKey::Execute => 8,
            VKey::Save => 11,
        }
    }
}

/// A live ERP GUI session. Implementations are expected to block on the
/// remote desktop and apply their own retry/timeout policy.
pub trait ErpTerminal {
    /// Navigate to a transaction code.
    fn run_command(&mut self, tcode: &str) -> Result<()>;

    /// Set a screen field by its control id.
    fn set_field(&mut self, field_id: &str, value: &str) -> Result<()>;

    fn send_key(&mut self, key: VKey) -> Result<()>;

    /// Export the current grid view to a file.
    fn export_current_view(&mut self, dest: &Path) -> Result<()>;
}

pub const TRIAL_BALANCE_TCODE: &str = "F.01";

const FIELD_COMPANY_CODE: &str = "wnd[0]/usr/ctrlCOMPANY_CODE/txtS_BUKRS-LOW";
const FIELD_FISCAL_YEAR: &str = "wnd[0]/usr/ctrlFISCAL_YEAR/txtS_GJAHR-LOW";
const FIELD_PERIOD: &str = "wnd[0]/usr/ctrlPERIOD/txtS_MONAT-LOW";

/// Drive the trial-balance transaction and export its grid to `dest`.
pub fn extract_trial_balance(
    terminal: &mut dyn ErpTerminal,
    settings: &Settings,
    dest: &Path,
) -> Result<PathBuf> {
    let (year, month) = settings.period.split_once('.').ok_or_else(|| {
        CloseoutError::Settings(format!(
            "invalid period '{}' (expected YYYY.MM)",
            settings.period
        ))
    })?;

    terminal.run_command(TRIAL_BALANCE_TCODE)?;
    terminal.set_field(FIELD_COMPANY_CODE, &settings.company_code)?;
    terminal.set_field(FIELD_FISCAL_YEAR, year)?;
    terminal.set_field(FIELD_PERIOD, month)?;
    terminal.send_key(VKey::Execute)?;
    terminal.export_current_view(dest)?;
    Ok(dest.to_path_buf())
}

/// Terminal stand-in that records the driven script and writes a canned grid
/// on export. Used by `closeout demo` and by tests; a real GUI-scripting
/// backend implements the same trait out of tree.
#[allow(dead_code)]
pub struct ScriptedTerminal {
    grid_csv: String,
    pub commands: Vec<String>,
    pub fields: Vec<(String, String)>,
    pub keys: Vec<VKey>,
}

impl ScriptedTerminal {
    pub fn new(grid_csv: impl Into<String>) -> Self {
        Self {
            grid_csv: grid_csv.into(),
            commands: Vec::new(),
            fields: Vec::new(),
            keys: Vec::new(),
        }
    }
}

impl ErpTerminal for ScriptedTerminal {
    fn run_command(&mut self, tcode: &str) -> Result<()> {
        self.commands.push(tcode.to_string());
        Ok(())
    }

    fn set_field(&mut self, field_id: &str, value: &str) -> Result<()> {
        self.fields.push((field_id.to_string(), value.to_string()));
        Ok(())
    }

    fn send_key(&mut self, key: VKey) -> Result<()> {
        self.keys.push(key);
        Ok(())
    }

    fn export_current_view(&mut self, dest: &Path) -> Result<()> {
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(dest, &self.grid_csv).map_err(|e| {
            CloseoutError::Terminal(format!("export to {} failed: {e}", dest.display()))
        })?;
        Ok(())
    }
}
