//! Installment sensitivity sweep over monthly rates and term lengths
//!
//! Usage: cargo run --bin installment_sweep

use rayon::prelude::*;

use pension_audit::records::loader::LoadedCase;
use pension_audit::retroactive::installment_payment;
use pension_audit::{AuditCase, AuditEngine};

fn main() {
    env_logger::init();

    println!("Loading case from data/case...");
    let loaded = LoadedCase::load_default().expect("Failed to load case");
    let case = AuditCase::from_loaded(&loaded).expect("Failed to build case");

    let outcome = AuditEngine::default().run_case(&case).expect("Audit failed");
    let grand_total = outcome.statement.owed.grand_total;
    println!("Grand total owed: {:.2}\n", grand_total);

    // 0.2% to 1.0% per month, 1 to 6 year terms
    let rates: Vec<f64> = (2..=10).map(|per_mille| per_mille as f64 / 1000.0).collect();
    let terms: Vec<u32> = (1..=6).map(|years| years * 12).collect();

    let table: Vec<(f64, Vec<f64>)> = rates
        .par_iter()
        .map(|&rate| {
            let payments = terms
                .iter()
                .map(|&n| installment_payment(grand_total, rate, n).expect("payment"))
                .collect();
            (rate, payments)
        })
        .collect();

    print!("{:>8}", "rate");
    for term in &terms {
        print!(" {:>12}", format!("{}m", term));
    }
    println!();
    println!("{}", "-".repeat(8 + terms.len() * 13));

    for (rate, payments) in &table {
        print!("{:>7.2}%", rate * 100.0);
        for payment in payments {
            print!(" {:>12.2}", payment);
        }
        println!();
    }
}
