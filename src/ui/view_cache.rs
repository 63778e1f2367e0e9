// src/ui/view_cache.rs
//! Computed views for the current table, built on first use and reused
//! every frame until the selection or the table changes.

use std::collections::HashMap;

use bevy::prelude::*;

use super::charts::BarChart;
use crate::dataset::error::ViewError;
use crate::dataset::systems::analysis::{
    bivariate, describe_column, describe_table, multivariate, value_counts, BoxSummary,
    GroupedView, Histogram, TextFrame, DEFAULT_BINS,
};
use crate::dataset::{Column, DataTable};

const PREVIEW_ROWS: usize = 5;

pub struct OverviewView {
    pub head: TextFrame,
    pub tail: TextFrame,
    pub summary: TextFrame,
}

pub struct CategoricalView {
    pub counts: Vec<(String, usize)>,
    pub chart: BarChart,
}

pub struct NumericalView {
    pub histogram: Option<Histogram>,
    pub box_summary: Option<BoxSummary>,
    pub stats: TextFrame,
}

pub struct GroupedChartView {
    pub view: GroupedView,
    pub chart: BarChart,
}

type PairKey = (String, String);

#[derive(Resource, Default)]
pub struct ViewCache {
    generation: u64,
    overview: Option<OverviewView>,
    categorical: HashMap<String, CategoricalView>,
    numerical: HashMap<String, NumericalView>,
    bivariate: HashMap<PairKey, Result<GroupedChartView, ViewError>>,
    multivariate: HashMap<PairKey, Result<GroupedChartView, ViewError>>,
}

fn grouped(result: Result<GroupedView, ViewError>) -> Result<GroupedChartView, ViewError> {
    result.map(|view| GroupedChartView {
        chart: BarChart::from_grouped(&view),
        view,
    })
}

impl ViewCache {
    /// Drops every stored view when the table generation moved.
    pub fn sync(&mut self, generation: u64) {
        if self.generation != generation {
            trace!("View cache reset for dataset generation {}", generation);
            *self = Self {
                generation,
                ..Default::default()
            };
        }
    }

    pub fn len(&self) -> usize {
        usize::from(self.overview.is_some())
            + self.categorical.len()
            + self.numerical.len()
            + self.bivariate.len()
            + self.multivariate.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn overview(&mut self, table: &DataTable) -> &OverviewView {
        self.overview.get_or_insert_with(|| OverviewView {
            head: TextFrame::from_table_rows(table, table.head_rows(PREVIEW_ROWS)),
            tail: TextFrame::from_table_rows(table, table.tail_rows(PREVIEW_ROWS)),
            summary: describe_table(table),
        })
    }

    pub fn categorical(&mut self, column: &Column) -> &CategoricalView {
        self.categorical
            .entry(column.name.clone())
            .or_insert_with(|| {
                let counts = value_counts(column);
                let chart = BarChart::from_counts(format!("Count of {}", column.name), &column.name, &counts);
                CategoricalView { counts, chart }
            })
    }

    pub fn numerical(&mut self, column: &Column) -> &NumericalView {
        self.numerical.entry(column.name.clone()).or_insert_with(|| {
            let values = column.present_numbers();
            NumericalView {
                histogram: Histogram::build(&values, DEFAULT_BINS),
                box_summary: BoxSummary::build(&values),
                stats: describe_column(column),
            }
        })
    }

    pub fn bivariate(&mut self, table: &DataTable, x: &str, y: &str) -> &Result<GroupedChartView, ViewError> {
        self.bivariate
            .entry((x.to_string(), y.to_string()))
            .or_insert_with(|| grouped(bivariate(table, x, y)))
    }

    pub fn multivariate(&mut self, table: &DataTable, x: &str, hue: &str) -> &Result<GroupedChartView, ViewError> {
        self.multivariate
            .entry((x.to_string(), hue.to_string()))
            .or_insert_with(|| grouped(multivariate(table, x, hue)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::systems::io::parsers::parse_csv;

    fn table() -> DataTable {
        parse_csv(
            "Country,Cause,Number_of_Deaths\n\
             India,Malaria,10\n\
             Chile,Stroke,4\n\
             India,Stroke,7\n"
                .as_bytes(),
        )
        .unwrap()
    }

    #[test]
    fn views_are_reused_within_a_generation() {
        let table = table();
        let mut cache = ViewCache::default();
        cache.sync(1);
        let first = cache.bivariate(&table, "Country", "Number_of_Deaths").as_ref().unwrap().view.clone();
        cache.overview(&table);
        cache.categorical(table.column("Cause").unwrap());
        assert_eq!(cache.len(), 3);

        cache.sync(1);
        let again = cache.bivariate(&table, "Country", "Number_of_Deaths").as_ref().unwrap().view.clone();
        assert_eq!(first, again);
        assert_eq!(first, bivariate(&table, "Country", "Number_of_Deaths").unwrap());
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn new_generation_drops_views() {
        let table = table();
        let mut cache = ViewCache::default();
        cache.sync(1);
        cache.numerical(table.column("Number_of_Deaths").unwrap());
        cache.multivariate(&table, "Country", "Cause");
        assert_eq!(cache.len(), 2);

        cache.sync(2);
        assert!(cache.is_empty());
    }

    #[test]
    fn view_errors_are_cached_too() {
        let table = table();
        let mut cache = ViewCache::default();
        assert!(matches!(
            cache.multivariate(&table, "Country", "Country"),
            Err(ViewError::SameColumns)
        ));
        let counts = &cache.categorical(table.column("Cause").unwrap()).counts;
        assert_eq!(counts[0], ("Stroke".to_string(), 2));
        assert_eq!(cache.len(), 2);
    }
}
