use rust_decimal::Decimal;

/// Child-count based tax reduction parameters.
///
/// `per_kids[n]` is the base reduction for `n` children. Counts beyond the
/// last tabulated index add `per_extra_kid` for each additional child. Above
/// `phase_out_threshold` of taxable salary the reduction shrinks by
/// `phase_out_amount` for every `phase_out_step` of salary, unless the family
/// has `phase_out_exempt_kids` or more children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReductionTable<'a> {
    pub per_kids: &'a [Decimal],
    pub per_extra_kid: Decimal,
    pub phase_out_threshold: Decimal,
    pub phase_out_step: Decimal,
    pub phase_out_amount: Decimal,
    pub phase_out_exempt_kids: u32,
}

impl ReductionTable<'_> {
    /// Highest child count with an explicit table entry.
    pub fn max_tabulated_kids(&self) -> u32 {
        self.per_kids.len().saturating_sub(1) as u32
    }

    /// Reduction before any phase-out is applied.
    pub fn base_reduction(
        &self,
        kids: u32,
    ) -> Decimal {
        let max_kids = self.max_tabulated_kids();
        let Some(max_entry) = self.per_kids.last().copied() else {
            return Decimal::ZERO;
        };

        if kids > max_kids {
            max_entry + Decimal::from(kids - max_kids) * self.per_extra_kid
        } else {
            self.per_kids[kids as usize]
        }
    }

    /// Whether phase-out applies to a family with `kids` children.
    pub fn phases_out(
        &self,
        kids: u32,
    ) -> bool {
        kids < self.phase_out_exempt_kids
    }
}
