use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;
use supplychain_core::QueryReport;
use supplychain_generate::SeedReport;

use crate::error::CliError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    tables_created: bool,
    seed: Option<&'a SeedReport>,
    report: &'a QueryReport,
}

/// Writes run progress and the query report to `out`.
///
/// Text mode prints as the run advances; JSON mode buffers progress and emits
/// one document at the end.
pub struct Renderer<W: Write> {
    out: W,
    format: OutputFormat,
    tables_created: bool,
    seed: Option<SeedReport>,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self {
            out,
            format,
            tables_created: false,
            seed: None,
        }
    }

    pub fn tables_created(&mut self) -> io::Result<()> {
        self.tables_created = true;
        if self.format == OutputFormat::Text {
            writeln!(self.out, "Tables created successfully.")?;
        }
        Ok(())
    }

    pub fn seeded(&mut self, report: &SeedReport) -> io::Result<()> {
        if self.format == OutputFormat::Text {
            writeln!(
                self.out,
                "Data inserted successfully: {} suppliers, {} materials, {} deliveries.",
                report.suppliers, report.materials, report.deliveries
            )?;
        }
        self.seed = Some(report.clone());
        Ok(())
    }

    pub fn report(&mut self, report: &QueryReport) -> Result<(), CliError> {
        match self.format {
            OutputFormat::Text => write_text_report(&mut self.out, report)?,
            OutputFormat::Json => {
                let doc = JsonOutput {
                    tables_created: self.tables_created,
                    seed: self.seed.as_ref(),
                    report,
                };
                serde_json::to_writer_pretty(&mut self.out, &doc)?;
                writeln!(self.out)?;
            }
        }
        self.out.flush()?;
        Ok(())
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

fn write_text_report<W: Write>(out: &mut W, report: &QueryReport) -> io::Result<()> {
    writeln!(
        out,
        "\nDeliveries completed in {} days or less:",
        report.fast_delivery_days
    )?;
    for row in &report.fast_deliveries {
        writeln!(
            out,
            "Delivery ID: {}, Supplier: {}, Delivery Days: {}",
            row.delivery_id, row.company_name, row.delivery_days
        )?;
    }

    writeln!(out, "\nTotal amount due per delivery:")?;
    for row in &report.delivery_costs {
        writeln!(
            out,
            "Delivery ID: {}, Total Amount: {}",
            row.delivery_id,
            row.total_display()
        )?;
    }

    writeln!(out, "\nDeliveries of {}:", report.selected_material)?;
    for row in &report.material_deliveries {
        writeln!(
            out,
            "Delivery ID: {}, Supplier: {}",
            row.delivery_id, row.company_name
        )?;
    }

    writeln!(out, "\nQuantity supplied per supplier and material:")?;
    for row in &report.supplier_material_quantities {
        writeln!(
            out,
            "Supplier: {}, Material: {}, Total Quantity: {}",
            row.company_name, row.material_name, row.total_quantity
        )?;
    }

    writeln!(out, "\nTotal quantity per material:")?;
    for row in &report.material_quantities {
        writeln!(
            out,
            "Material: {}, Total Quantity: {}",
            row.material_name, row.total_quantity
        )?;
    }

    writeln!(out, "\nDeliveries per supplier:")?;
    for row in &report.supplier_delivery_counts {
        writeln!(
            out,
            "Supplier: {}, Total Deliveries: {}",
            row.company_name, row.total_deliveries
        )?;
    }
    Ok(())
}
