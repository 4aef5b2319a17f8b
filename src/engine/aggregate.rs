use serde::Serialize;

/// One group's slice of a total, as shown in the finance breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupShare {
    pub group: String,
    pub amount: u64,
    /// Share of the total in percent, rounded to one decimal.
    pub percentage: f64,
}

pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Summary numbers over a (usually already filtered) set of records.
pub struct Aggregator<'a, T> {
    records: Vec<&'a T>,
}

impl<'a, T> Aggregator<'a, T> {
    pub fn new(records: impl IntoIterator<Item = &'a T>) -> Self {
        Self {
            records: records.into_iter().collect(),
        }
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn count_where(&self, predicate: impl Fn(&T) -> bool) -> usize {
        self.records.iter().copied().filter(|r| predicate(r)).count()
    }

    pub fn sum(&self, field: impl Fn(&T) -> u64) -> u64 {
        self.records.iter().copied().map(field).fold(0, u64::saturating_add)
    }

    pub fn sum_where(&self, predicate: impl Fn(&T) -> bool, field: impl Fn(&T) -> u64) -> u64 {
        self.records
            .iter()
            .copied()
            .filter(|r| predicate(r))
            .map(field)
            .fold(0, u64::saturating_add)
    }

    /// Groups records by `group` and reports each group's share of the summed `amount`,
    /// in the order groups are first seen. A zero total gives every group 0%.
    pub fn group_percentages<G: AsRef<str>>(
        &self,
        group: impl Fn(&'a T) -> G,
        amount: impl Fn(&T) -> u64,
    ) -> Vec<GroupShare> {
        let mut groups: Vec<(String, u64)> = Vec::new();
        for record in self.records.iter().copied() {
            let name = group(record);
            let key = name.as_ref();
            let value = amount(record);
            match groups.iter_mut().find(|(name, _)| name == key) {
                Some(entry) => entry.1 = entry.1.saturating_add(value),
                None => groups.push((key.to_string(), value)),
            }
        }

        let total = groups.iter().map(|(_, sum)| *sum).fold(0, u64::saturating_add);
        groups
            .into_iter()
            .map(|(group, amount)| {
                let percentage = if total == 0 {
                    0.0
                } else {
                    round_one_decimal(100.0 * amount as f64 / total as f64)
                };
                GroupShare {
                    group,
                    amount,
                    percentage,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Expense {
        category: &'static str,
        amount: u64,
    }

    fn expenses() -> Vec<Expense> {
        vec![
            Expense { category: "Materials", amount: 8_500_000 },
            Expense { category: "Labour", amount: 4_200_000 },
            Expense { category: "Equipment", amount: 2_300_000 },
            Expense { category: "Utilities", amount: 950_000 },
            Expense { category: "Other", amount: 600_000 },
        ]
    }

    #[test]
    fn empty_set_aggregates_to_zero() {
        let none: Vec<Expense> = Vec::new();
        let agg = Aggregator::new(&none);
        assert_eq!(agg.count(), 0);
        assert_eq!(agg.sum(|e| e.amount), 0);
        assert_eq!(agg.sum_where(|_| true, |e| e.amount), 0);
        assert!(agg.group_percentages(|e| e.category, |e| e.amount).is_empty());
    }

    #[test]
    fn sum_where_only_counts_matching_records() {
        let expenses = expenses();
        let agg = Aggregator::new(&expenses);
        assert_eq!(agg.sum(|e| e.amount), 16_550_000);
        assert_eq!(
            agg.sum_where(|e| e.category.starts_with('L') || e.category == "Other", |e| e.amount),
            4_800_000
        );
        assert_eq!(agg.count_where(|e| e.amount > 1_000_000), 3);
    }

    #[test]
    fn sums_saturate_instead_of_overflowing() {
        let expenses = vec![
            Expense { category: "Materials", amount: u64::MAX },
            Expense { category: "Labour", amount: 125_000 },
        ];
        let agg = Aggregator::new(&expenses);
        assert_eq!(agg.sum(|e| e.amount), u64::MAX);
        assert_eq!(agg.sum_where(|_| true, |e| e.amount), u64::MAX);

        let shares = agg.group_percentages(|e| e.category, |e| e.amount);
        assert_eq!(shares[0].percentage, 100.0);
        assert_eq!(shares[1].percentage, 0.0);
    }

    #[test]
    fn percentages_round_to_one_decimal() {
        let expenses = expenses();
        let shares = Aggregator::new(&expenses).group_percentages(|e| e.category, |e| e.amount);
        let pct: Vec<f64> = shares.iter().map(|s| s.percentage).collect();
        assert_eq!(pct, vec![51.4, 25.4, 13.9, 5.7, 3.6]);
    }

    #[test]
    fn percentages_add_up_to_one_hundred() {
        let expenses = expenses();
        let shares = Aggregator::new(&expenses).group_percentages(|e| e.category, |e| e.amount);
        let total: f64 = shares.iter().map(|s| s.percentage).sum();
        let tolerance = 0.1 * shares.len() as f64;
        assert!((total - 100.0).abs() <= tolerance, "total was {}", total);
    }

    #[test]
    fn groups_merge_and_keep_first_seen_order() {
        let expenses = vec![
            Expense { category: "b", amount: 1 },
            Expense { category: "a", amount: 1 },
            Expense { category: "b", amount: 2 },
        ];
        let shares = Aggregator::new(&expenses).group_percentages(|e| e.category, |e| e.amount);
        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].group, "b");
        assert_eq!(shares[0].amount, 3);
        assert_eq!(shares[0].percentage, 75.0);
        assert_eq!(shares[1].percentage, 25.0);
    }

    #[test]
    fn zero_total_gives_zero_percentages() {
        let expenses = vec![
            Expense { category: "a", amount: 0 },
            Expense { category: "b", amount: 0 },
        ];
        let shares = Aggregator::new(&expenses).group_percentages(|e| e.category, |e| e.amount);
        assert!(shares.iter().all(|s| s.percentage == 0.0));
    }
}
