use crate::error::Result;
use crate::settings::load_settings;
use crate::terminal::{extract_trial_balance, ScriptedTerminal};

/// Sample grid in the shape the ERP export produces.
const SAMPLE_TRIAL_BALANCE: &str = "\
G/L Account,Debit,Credit
Cash,8500000,
Ordinary deposits,12000000,
Accounts receivable,5400000,
Inventories,3200000,
Building,25000000,
Software license,1800000,
Accounts payable,,4700000
Short-term borrowings,,6000000
Accrued expenses,,900000
Long-term borrowings,,10000000
Capital stock,,20000000
Retained earnings,,8300000
Sales revenue,,32000000
Cost of goods sold,21500000,
Salaries expense,4200000,
Rent expense,1100000,
Depreciation expense,800000,
Advertising expense,600000,
Interest income,,150000
Interest expense,450000,
Income tax expense,700000,
";

/// Extract a sample trial balance through a scripted terminal session and
/// run the statements pipeline on it, so the whole flow can be explored
/// without an ERP connection.
pub fn run(dir: Option<String>) -> Result<()> {
    let mut settings = load_settings();
    if let Some(d) = dir {
        settings.data_dir = d;
    }
    std::fs::create_dir_all(settings.input_dir())?;
    std::fs::create_dir_all(settings.output_dir())?;
    std::fs::create_dir_all(settings.temp_dir())?;

    let mut terminal = ScriptedTerminal::new(SAMPLE_TRIAL_BALANCE);
    let dest = settings.trial_balance_path();
    let path = extract_trial_balance(&mut terminal, &settings, &dest)?;
    println!("Extracted sample trial balance to {}", path.display());
    println!();

    super::statements::run_pipeline(
        &settings,
        &path,
        &settings.output_dir(),
        settings.match_policy,
    )
}
