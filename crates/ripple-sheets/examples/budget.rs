//! Example: a small budget that recalculates as inputs change

use ripple_sheets::prelude::*;

fn main() -> Result<()> {
    let mut sheet = Sheet::new();

    // Inputs
    sheet.set_cell("A1", "1200")?; // rent
    sheet.set_cell("A2", "350")?; // food
    sheet.set_cell("A3", "3000")?; // income

    // Derived
    sheet.set_cell("B1", "=A1+A2")?;
    sheet.set_cell("B2", "=A3-B1")?;
    sheet.set_cell("B3", "=B1/A3*100")?;

    println!("spent:   {}", sheet.cell_value("B1")?);
    println!("left:    {}", sheet.cell_value("B2")?);
    println!("percent: {:.1}", sheet.cell_value("B3")?);

    // Rent goes up; only cells downstream of A1 are evaluated
    let stats = sheet.set_cell("A1", "1500")?;
    println!(
        "recalculated {} of {} affected cells",
        stats.cells_calculated, stats.affected
    );
    println!("left:    {}", sheet.cell_value("B2")?);

    // No income makes the percentage a fault
    sheet.set_cell("A3", "0")?;
    let b3 = CellAddress::parse("B3")?;
    println!("percent: {}", sheet.error_kind_at(b3));

    // Circular formulas are refused at write time
    let stats = sheet.set_cell("A2", "=B2")?;
    println!(
        "A2 rejected: {} ({} circular)",
        sheet.has_error("A2")?,
        stats.circular_references
    );

    Ok(())
}
