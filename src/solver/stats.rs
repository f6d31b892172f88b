use std::fmt::{self, Debug, Display, Formatter};

use separator::Separatable;

#[derive(Clone, Default, PartialEq, Eq)]
pub struct Stats {
    created_states: Vec<u64>,
    visited_states: Vec<u64>,
    duplicate_states: Vec<u64>,
    /// Accepted plans per strategy, in the order the strategies first produced one.
    plans: Vec<(&'static str, u64)>,
}

impl Stats {
    pub fn new() -> Self {
        Stats::default()
    }

    pub fn total_created(&self) -> u64 {
        self.created_states.iter().sum()
    }

    pub fn total_unique_visited(&self) -> u64 {
        self.visited_states.iter().sum()
    }

    pub fn total_reached_duplicates(&self) -> u64 {
        self.duplicate_states.iter().sum()
    }

    pub fn total_plans(&self) -> u64 {
        self.plans.iter().map(|&(_, count)| count).sum()
    }

    pub fn plans(&self, strategy: &str) -> u64 {
        self.plans
            .iter()
            .find(|&&(name, _)| name == strategy)
            .map_or(0, |&(_, count)| count)
    }

    pub(crate) fn add_created(&mut self, depth: usize) -> bool {
        Self::add(&mut self.created_states, depth)
    }

    pub(crate) fn add_unique_visited(&mut self, depth: usize) -> bool {
        Self::add(&mut self.visited_states, depth)
    }

    pub(crate) fn add_reached_duplicate(&mut self, depth: usize) -> bool {
        Self::add(&mut self.duplicate_states, depth)
    }

    pub(crate) fn add_plan(&mut self, strategy: &'static str) {
        match self.plans.iter_mut().find(|(name, _)| *name == strategy) {
            Some((_, count)) => *count += 1,
            None => self.plans.push((strategy, 1)),
        }
    }

    /// Returns true if this is the first state at this depth.
    fn add(counts: &mut Vec<u64>, depth: usize) -> bool {
        let mut ret = false;

        // while because some depths might be skipped (the start node is never re-counted)
        while depth >= counts.len() {
            counts.push(0);
            ret = true;
        }
        counts[depth] += 1;
        ret
    }
}

impl Debug for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "created by depth: {:?}", self.created_states)?;
        writeln!(f, "reached duplicates by depth: {:?}", self.duplicate_states)?;
        writeln!(f, "unique visited by depth: {:?}", self.visited_states)?;
        writeln!(f, "plans by strategy: {:?}", self.plans)?;
        writeln!(f, "total created: {}", self.total_created().separated_string())?;
        writeln!(f, "total reached duplicates: {}", self.total_reached_duplicates().separated_string())?;
        writeln!(f, "total unique visited: {}", self.total_unique_visited().separated_string())
    }
}

impl Display for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let created = self.total_created();
        let duplicates = self.total_reached_duplicates();
        let visited = self.total_unique_visited();
        writeln!(f, "States created total: {}", created.separated_string())?;
        writeln!(f, "Unique states visited total: {}", visited.separated_string())?;
        writeln!(f, "Reached duplicates total: {}", duplicates.separated_string())?;
        writeln!(f, "Plans total: {}", self.total_plans().separated_string())?;
        for &(name, count) in &self.plans {
            writeln!(f, "    {:<20}{}", name, count.separated_string())?;
        }
        writeln!(f)?;

        writeln!(f, "Depth / created states:")?;
        writeln!(f, "|                   Depth / reached duplicates:")?;
        writeln!(f, "|                   |                   Depth / unique visited states:")?;
        // created_states should be the longest vec
        for i in 0..self.created_states.len() {
            let depth = format!("{}: ", i);
            let visited = self.visited_states.get(i).cloned().unwrap_or(0);
            let duplicates = self.duplicate_states.get(i).cloned().unwrap_or(0);
            writeln!(
                f,
                "{0:<5}{1:<15}{0:<5}{2:<15}{0:<5}{3:<15}",
                depth,
                self.created_states[i].separated_string(),
                duplicates.separated_string(),
                visited.separated_string()
            )?;
        }
        Ok(())
    }
}
