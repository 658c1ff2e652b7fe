//! Pension Audit CLI
//!
//! Loads a case directory, runs the comparative pipeline, and prints the
//! comparison and retroactive tables. Optionally writes the retroactive
//! statement to CSV.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Parser;

use pension_audit::records::loader::{LoadedCase, DEFAULT_CASE_PATH};
use pension_audit::retroactive::InstallmentPlan;
use pension_audit::{AuditCase, AuditEngine, AuditOutcome};

#[derive(Parser)]
#[command(version, about = "Run a comparative benefit audit over a case directory")]
struct Args {
    /// Case directory with the CNIS extract and schedule fixtures
    #[arg(long, default_value = DEFAULT_CASE_PATH)]
    case_dir: PathBuf,

    /// Write the retroactive statement to this CSV file
    #[arg(long)]
    output: Option<PathBuf>,

    /// Monthly interest rate for installment pricing
    #[arg(long, default_value_t = 0.005)]
    monthly_rate: f64,

    /// Installment counts to price, comma separated
    #[arg(long, value_delimiter = ',', default_values_t = vec![24u32, 36, 60])]
    installments: Vec<u32>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let loaded = LoadedCase::load_from(&args.case_dir)
        .map_err(|e| anyhow::anyhow!("loading case from {}: {}", args.case_dir.display(), e))?;
    let case = AuditCase::from_loaded(&loaded)?;

    let engine = AuditEngine::new(InstallmentPlan {
        counts: args.installments.clone(),
        monthly_rate: args.monthly_rate,
    });
    let outcome = engine.run_case(&case)?;

    print_report(&outcome);

    if let Some(path) = &args.output {
        write_statement_csv(path, &outcome)?;
        println!("\nStatement written to: {}", path.display());
    }

    Ok(())
}

fn print_report(outcome: &AuditOutcome) {
    println!("Pension Audit v0.1.0");
    println!("====================\n");

    let beneficiary = &outcome.beneficiary;
    println!("Beneficiary: {}", beneficiary.name);
    println!(
        "  Benefit:     {} ({})",
        beneficiary.benefit_number, beneficiary.benefit_species
    );
    println!("  Requirement: {}", beneficiary.requirement_date);
    println!(
        "  Contribution time: {}y {}m {}d",
        beneficiary.contribution_time.years,
        beneficiary.contribution_time.months,
        beneficiary.contribution_time.days,
    );
    println!();

    println!(
        "{:<28} {:>14} {:>14} {:>12}",
        "Parameter", "Official", "Recalculated", "Delta"
    );
    println!("{}", "-".repeat(72));
    println!(
        "{:<28} {:>14} {:>14} {:>12}",
        "Records analyzed",
        outcome.official.total_contributions,
        outcome.recalculated.total_contributions,
        outcome.recalculated.total_contributions as i64
            - outcome.official.total_contributions as i64,
    );
    println!(
        "{:<28} {:>14} {:>14} {:>12}",
        "Considered (80%)",
        outcome.official.considered_contributions,
        outcome.recalculated.considered_contributions,
        outcome.recalculated.considered_contributions as i64
            - outcome.official.considered_contributions as i64,
    );
    println!(
        "{:<28} {:>14.2} {:>14.2} {:>12.2}",
        "Average salary",
        outcome.official.average_salary,
        outcome.recalculated.average_salary,
        outcome.recalculated.average_salary - outcome.official.average_salary,
    );
    println!(
        "{:<28} {:>14.4} {:>14.4} {:>12.4}",
        "Pension factor",
        outcome.official.pension_factor,
        outcome.recalculated.pension_factor,
        outcome.recalculated.pension_factor - outcome.official.pension_factor,
    );
    println!(
        "{:<28} {:>14.2} {:>14.2} {:>12.2}",
        "Benefit salary",
        outcome.official.benefit_salary,
        outcome.recalculated.benefit_salary,
        outcome.monthly_shortfall,
    );
    println!();
    println!(
        "Monthly shortfall: {:.2} ({:+.2}%), reclaimable periods: {}",
        outcome.monthly_shortfall, outcome.shortfall_pct, outcome.reclaimable_periods,
    );
    println!();

    println!(
        "{:>6} {:>12} {:>7} {:>14} {:>12} {:>12} {:>14}",
        "Year", "Monthly", "Months", "Accumulated", "Correction", "Interest", "Total"
    );
    println!("{}", "-".repeat(82));
    for year in &outcome.statement.years {
        println!(
            "{:>6} {:>12.2} {:>7} {:>14.2} {:>12.2} {:>12.2} {:>14.2}",
            year.year,
            year.monthly_difference,
            year.months_in_year,
            year.accumulated_for_year,
            year.monetary_correction,
            year.legal_interest,
            year.total_for_year,
        );
    }

    let owed = &outcome.statement.owed;
    println!("{}", "-".repeat(82));
    println!("Past-due differences: {:>14.2}", owed.past_due_differences);
    println!("Monetary correction:  {:>14.2}", owed.monetary_correction);
    println!("Legal interest:       {:>14.2}", owed.legal_interest);
    println!("Grand total:          {:>14.2}", owed.grand_total);
    println!();

    println!("Installment options:");
    for (count, payment) in &owed.monthly_installment_options {
        println!("  {:>3} months: {:>12.2}/month", count, payment);
    }
}

fn write_statement_csv(path: &Path, outcome: &AuditOutcome) -> anyhow::Result<()> {
    let mut file = File::create(path)?;

    writeln!(
        file,
        "Year,MonthlyDifference,Months,Accumulated,MonetaryCorrection,LegalInterest,TotalForYear"
    )?;
    for year in &outcome.statement.years {
        writeln!(
            file,
            "{},{:.2},{},{:.2},{:.2},{:.2},{:.2}",
            year.year,
            year.monthly_difference,
            year.months_in_year,
            year.accumulated_for_year,
            year.monetary_correction,
            year.legal_interest,
            year.total_for_year,
        )?;
    }

    Ok(())
}
