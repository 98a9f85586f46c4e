//! Account state tracking during a month-by-month projection

/// State of the investment account at the end of a month
#[derive(Debug, Clone)]
pub struct AccountState {
    /// Current projection month (0 = start)
    pub month: u32,

    /// Total account balance
    pub balance: f64,

    /// Cumulative principal paid in
    pub invested: f64,
}

impl AccountState {
    /// Initialize state at month 0 with the initial principal
    pub fn from_initial(initial: f64) -> Self {
        Self {
            month: 0,
            balance: initial,
            invested: initial,
        }
    }

    /// Advance to next month: accrue interest on the opening balance, then add
    /// this month's contribution. Returns the interest credited.
    pub fn advance_month(&mut self, monthly_rate: f64, contribution: f64) -> f64 {
        self.month += 1;

        let interest = self.balance * monthly_rate;
        self.balance += interest + contribution;
        self.invested += contribution;

        interest
    }

    /// Growth earned so far (balance over principal)
    pub fn gain(&self) -> f64 {
        self.balance - self.invested
    }
}
