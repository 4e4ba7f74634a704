//! Salary component resolution.
//!
//! Resolves a monthly working set of salary component lines into final
//! amounts: flat values taken literally, percentage values resolved
//! against the BASIC component, and day-prorated components scaled by
//! payable days. Resolution is a pure function; callers re-run it in
//! full after any row edit or attendance change.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceSummary, ComponentKind, SalaryComponentDefinition, SalaryComponentLine, ValueKind,
};

/// The component every percentage value resolves against.
pub const BASIC_COMPONENT: &str = "BASIC";

/// Inputs to one component resolution.
#[derive(Debug, Clone)]
pub struct ComponentInputs<'a> {
    /// The component catalogue, in definition order.
    pub definitions: &'a [SalaryComponentDefinition],
    /// The employee's monthly base salary, seeding BASIC's default value.
    pub base_salary: Decimal,
    /// The month's attendance aggregation.
    pub attendance: AttendanceSummary,
    /// A previously persisted working set for the month; used instead of
    /// catalogue defaults when present.
    pub overrides: Option<&'a [SalaryComponentLine]>,
}

/// The outcome of a component resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedComponents {
    /// Every line of the working set, resolved, disabled rows included.
    pub lines: Vec<SalaryComponentLine>,
    /// BASIC's final amount; zero when BASIC is disabled.
    pub basic_amount: Decimal,
    /// Sum of allowed non-deduction amounts.
    pub gross_salary: Decimal,
    /// Sum of all allowed amounts, deductions already negative.
    pub net_salary: Decimal,
}

/// Resolves the amount of a single enabled line against the given BASIC
/// amount. Proration by payable days yields zero when the month has no
/// working days.
fn resolve_amount(
    line: &SalaryComponentLine,
    basic_amount: Decimal,
    attendance: &AttendanceSummary,
    prorate: bool,
) -> Decimal {
    let base_value = match line.value_kind {
        ValueKind::Flat => line.value,
        ValueKind::Percentage => basic_amount * line.value / Decimal::new(100, 0),
    };

    let amount = if prorate {
        let total = Decimal::from(attendance.total_working_days);
        if total.is_zero() {
            Decimal::ZERO
        } else {
            base_value / total * Decimal::from(attendance.payable_days())
        }
    } else {
        base_value
    };

    if line.is_deduction {
        -amount.abs()
    } else {
        amount.abs()
    }
}

/// Resolves a monthly working set of component lines into final amounts.
///
/// The working set comes from `overrides` when present, otherwise it is
/// built from the catalogue: BASIC starts as a flat line at the base
/// salary, every other component as a flat zero awaiting HR input.
///
/// Resolution runs two passes. Pass 1 walks the lines in order, reading
/// percentage values against BASIC's amount as known at that point. Pass 2
/// re-resolves every percentage line against BASIC's final amount, so a
/// percentage line ordered before BASIC, or an edit that toggled BASIC in
/// the same cycle, still lands on the current value.
///
/// A disabled line keeps its row with amount and value zeroed. Deduction
/// amounts always come out non-positive, earnings non-negative. Amounts
/// stay exact decimals; rounding happens at the presentation boundary.
///
/// # Errors
///
/// `Validation` when the working set does not contain exactly one
/// flat-valued line named BASIC.
pub fn resolve_components(inputs: &ComponentInputs) -> EngineResult<ResolvedComponents> {
    let mut lines: Vec<SalaryComponentLine> = match inputs.overrides {
        Some(existing) => existing.to_vec(),
        None => inputs
            .definitions
            .iter()
            .map(|definition| {
                let value = if definition.name == BASIC_COMPONENT {
                    inputs.base_salary
                } else {
                    Decimal::ZERO
                };
                SalaryComponentLine::flat(
                    definition.name.clone(),
                    value,
                    definition.kind == ComponentKind::Deduction,
                )
            })
            .collect(),
    };

    let basic_lines: Vec<&SalaryComponentLine> = lines
        .iter()
        .filter(|line| line.name == BASIC_COMPONENT)
        .collect();
    match basic_lines.as_slice() {
        [line] if line.value_kind == ValueKind::Flat => {}
        [_] => {
            return Err(EngineError::Validation {
                field: "components".to_string(),
                message: format!("{} must be flat-valued", BASIC_COMPONENT),
            });
        }
        _ => {
            return Err(EngineError::Validation {
                field: "components".to_string(),
                message: format!(
                    "exactly one {} component is required, found {}",
                    BASIC_COMPONENT,
                    basic_lines.len()
                ),
            });
        }
    }

    let prorated: HashMap<&str, bool> = inputs
        .definitions
        .iter()
        .map(|d| (d.name.as_str(), d.calculate_days))
        .collect();

    // Pass 1: resolve in order, tracking BASIC as it is encountered. A
    // percentage line ordered before BASIC reads the working set's prior
    // amount here and is corrected in pass 2.
    let mut basic_so_far = lines
        .iter()
        .find(|line| line.name == BASIC_COMPONENT && line.allowed)
        .map(|line| line.amount)
        .unwrap_or(Decimal::ZERO);

    for line in lines.iter_mut() {
        if !line.allowed {
            line.amount = Decimal::ZERO;
            line.value = Decimal::ZERO;
            continue;
        }
        let prorate = prorated.get(line.name.as_str()).copied().unwrap_or(false);
        line.amount = resolve_amount(line, basic_so_far, &inputs.attendance, prorate);
        if line.name == BASIC_COMPONENT {
            basic_so_far = line.amount;
        }
    }

    let basic_amount = lines
        .iter()
        .find(|line| line.name == BASIC_COMPONENT && line.allowed)
        .map(|line| line.amount)
        .unwrap_or(Decimal::ZERO);

    // Pass 2: settle every percentage line against BASIC's final amount.
    for line in lines.iter_mut() {
        if line.allowed && line.value_kind == ValueKind::Percentage {
            let prorate = prorated.get(line.name.as_str()).copied().unwrap_or(false);
            line.amount = resolve_amount(line, basic_amount, &inputs.attendance, prorate);
        }
    }

    let gross_salary = lines
        .iter()
        .filter(|line| line.allowed && !line.is_deduction)
        .map(|line| line.amount)
        .sum();
    let net_salary = lines
        .iter()
        .filter(|line| line.allowed)
        .map(|line| line.amount)
        .sum();

    Ok(ResolvedComponents {
        lines,
        basic_amount,
        gross_salary,
        net_salary,
    })
}
