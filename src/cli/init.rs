use crate::error::Result;
use crate::settings::{load_settings, save_settings, validate_period};

pub fn run(
    company_code: Option<String>,
    period: Option<String>,
    data_dir: Option<String>,
) -> Result<()> {
    let mut settings = load_settings();
    if let Some(code) = company_code {
        settings.company_code = code;
    }
    if let Some(p) = period {
        validate_period(&p)?;
        settings.period = p;
    }
    if let Some(dir) = data_dir {
        settings.data_dir = dir;
    }

    std::fs::create_dir_all(settings.input_dir())?;
    std::fs::create_dir_all(settings.output_dir())?;
    std::fs::create_dir_all(settings.temp_dir())?;
    save_settings(&settings)?;

    println!("Company code: {}", settings.company_code);
    println!("Period:       {}", settings.period);
    println!("Data dir:     {}", settings.data_dir);
    println!();
    println!("Drop monthly sales exports into {}", settings.input_dir().display());
    Ok(())
}
