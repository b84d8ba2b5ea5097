//! A dashboard session: one memoized dataset, a mutable selection, and the
//! views derived from both.

use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::cache::DatasetCache;
use crate::config::DashboardConfig;
use crate::error::Result;
use crate::output::export_views;
use crate::pipeline::{DashboardViews, compute_views};
use crate::record::Dataset;
use crate::render::{ChartRenderer, ChartSpec, chart_specs, render_views};
use crate::selection::Selection;
use crate::source::DataSource;

/// Files written by one [`Dashboard::render`] call.
#[derive(Debug, Clone, Default)]
pub struct RenderedPage {
    pub page: PathBuf,
    pub charts: Vec<PathBuf>,
    pub tables: Vec<PathBuf>,
}

pub struct Dashboard<S> {
    config: DashboardConfig,
    cache: DatasetCache<S>,
    selection: Selection,
}

impl<S: DataSource> Dashboard<S> {
    /// Starts a session with every candidate location selected.
    pub fn new(config: DashboardConfig, source: S) -> Result<Self> {
        config.validate()?;
        let selection = Selection::from_names(&config.candidates, &config.candidates)?;
        Ok(Self {
            config,
            cache: DatasetCache::new(source),
            selection,
        })
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn select(&mut self, selection: Selection) {
        info!(
            locations = ?selection.iter().collect::<Vec<_>>(),
            "Selection changed"
        );
        self.selection = selection;
    }

    /// Parses operator-typed names against the configured candidates.
    pub fn select_names<N: AsRef<str>>(&mut self, names: &[N]) -> Result<()> {
        let selection = Selection::from_names(names, &self.config.candidates)?;
        self.select(selection);
        Ok(())
    }

    pub fn select_all(&mut self) -> Result<()> {
        let candidates = self.config.candidates.clone();
        self.select_names(&candidates)
    }

    pub async fn dataset(&mut self) -> Result<Arc<Dataset>> {
        self.cache.get().await
    }

    /// Drops the memoized dataset; the next access downloads it again.
    pub fn clear_cache(&mut self) {
        self.cache.invalidate();
    }

    pub fn is_loaded(&self) -> bool {
        self.cache.is_loaded()
    }

    /// Derives the three views for the current selection.
    pub async fn views(&mut self) -> Result<DashboardViews> {
        let dataset = self.dataset().await?;
        compute_views(&dataset, &self.selection, self.config.window)
    }

    /// Computes the views, draws the charts, exports the tables and writes a
    /// markdown page linking them, all under the configured output directory.
    pub async fn render<R: ChartRenderer + ?Sized>(
        &mut self,
        renderer: &R,
    ) -> Result<RenderedPage> {
        let views = self.views().await?;
        let dir = self.config.output_dir.clone();

        let charts = render_views(renderer, &views, self.config.window, &dir)?;
        let tables = export_views(&views, &dir)?;

        let page = dir.join("index.md");
        let specs = chart_specs(&views, self.config.window);
        std::fs::write(&page, page_markdown(&self.config, &self.selection, &specs, &charts))?;

        info!(page = %page.display(), charts = charts.len(), "Dashboard rendered");
        Ok(RenderedPage {
            page,
            charts,
            tables,
        })
    }
}

/// Page body: title, selection, one section per chart, footer.
pub fn page_markdown(
    config: &DashboardConfig,
    selection: &Selection,
    specs: &[ChartSpec],
    charts: &[PathBuf],
) -> String {
    let mut page = format!("# {}\n\n", config.page_title);

    let selected: Vec<_> = selection.iter().collect();
    if selected.is_empty() {
        page.push_str("Selected countries: none\n\n");
    } else {
        page.push_str(&format!("Selected countries: {}\n\n", selected.join(", ")));
    }

    for (spec, chart) in specs.iter().zip(charts) {
        let file = chart
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_default();
        page.push_str(&format!("## {}\n\n![{}]({})\n\n", spec.heading, spec.title, file));
    }

    page.push_str(&format!("---\n\n{}\n", config.footer));
    page
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DashboardError;
    use crate::record::Record;
    use async_trait::async_trait;
    use chrono::{Days, NaiveDate};
    use std::cell::RefCell;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StaticSource {
        loads: AtomicUsize,
    }

    #[async_trait]
    impl DataSource for StaticSource {
        async fn load(&self) -> Result<Dataset> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            let start = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
            let mut records = Vec::new();
            for (location, population) in [("India", 1_000_000.0), ("Pakistan", 200_000_000.0)] {
                for i in 0..8u64 {
                    records.push(
                        Record::new(location, start + Days::new(i))
                            .with_new_cases(10.0)
                            .with_total_cases(1000.0)
                            .with_population(population)
                            .with_continent("Asia")
                            .with_total_vaccinations(i as f64),
                    );
                }
            }
            Ok(Dataset::from_records(records))
        }

        fn describe(&self) -> String {
            "static".to_string()
        }
    }

    #[derive(Default)]
    struct RecordingRenderer {
        drawn: RefCell<Vec<(String, bool)>>,
    }

    impl ChartRenderer for RecordingRenderer {
        fn draw(&self, spec: &ChartSpec, path: &Path) -> Result<()> {
            std::fs::write(path, spec.title)?;
            self.drawn
                .borrow_mut()
                .push((spec.name.to_string(), spec.is_empty()));
            Ok(())
        }

        fn extension(&self) -> &'static str {
            "txt"
        }
    }

    fn dashboard(output_dir: &Path) -> Dashboard<StaticSource> {
        let config = DashboardConfig {
            output_dir: output_dir.to_path_buf(),
            ..Default::default()
        };
        Dashboard::new(
            config,
            StaticSource {
                loads: AtomicUsize::new(0),
            },
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_selection_change_recomputes_without_refetch() {
        let dir = tempfile::tempdir().unwrap();
        let mut dashboard = dashboard(dir.path());

        let all = dashboard.views().await.unwrap();
        dashboard.select_names(&["India"]).unwrap();
        let india = dashboard.views().await.unwrap();

        assert_eq!(all.cases_per_100k.len(), 2);
        assert_eq!(india.cases_per_100k.len(), 1);
        assert_eq!(india.cases_per_100k[0].location, "India");
        assert_eq!(dashboard.cache.source().loads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_clear_cache_refetches() {
        let dir = tempfile::tempdir().unwrap();
        let mut dashboard = dashboard(dir.path());

        dashboard.views().await.unwrap();
        dashboard.clear_cache();
        assert!(!dashboard.is_loaded());
        dashboard.views().await.unwrap();

        assert_eq!(dashboard.cache.source().loads.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_empty_selection_renders_empty_charts() {
        let dir = tempfile::tempdir().unwrap();
        let mut dashboard = dashboard(dir.path());
        dashboard.select(Selection::default());

        let renderer = RecordingRenderer::default();
        let page = dashboard.render(&renderer).await.unwrap();

        assert_eq!(page.charts.len(), 3);
        assert_eq!(page.tables.len(), 3);
        assert!(renderer.drawn.borrow().iter().all(|(_, empty)| *empty));

        let index = std::fs::read_to_string(&page.page).unwrap();
        assert!(index.starts_with("# COVID-19 Dashboard"));
        assert!(index.contains("Selected countries: none"));
    }

    #[tokio::test]
    async fn test_render_writes_page_sections_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut dashboard = dashboard(dir.path());

        let renderer = RecordingRenderer::default();
        let page = dashboard.render(&renderer).await.unwrap();

        let names: Vec<_> = renderer.drawn.borrow().iter().map(|(n, _)| n.clone()).collect();
        assert_eq!(names, vec!["new_cases_7d", "cases_per_100k", "total_vaccinations"]);

        let index = std::fs::read_to_string(&page.page).unwrap();
        let smoothed = index.find("## Daily New Cases (7-Day Avg)").unwrap();
        let per_100k = index.find("## Total Cases per 100,000 People").unwrap();
        let vaccinations = index.find("## Total Vaccinations Over Time").unwrap();
        assert!(smoothed < per_100k && per_100k < vaccinations);
        assert!(index.contains("(new_cases_7d.txt)"));
        assert!(index.trim_end().ends_with(crate::config::FOOTER));
    }

    #[tokio::test]
    async fn test_page_heading_names_configured_window() {
        let dir = tempfile::tempdir().unwrap();
        let config = DashboardConfig {
            output_dir: dir.path().to_path_buf(),
            window: 3,
            ..Default::default()
        };
        let source = StaticSource {
            loads: AtomicUsize::new(0),
        };
        let mut dashboard = Dashboard::new(config, source).unwrap();

        let page = dashboard.render(&RecordingRenderer::default()).await.unwrap();

        let index = std::fs::read_to_string(&page.page).unwrap();
        assert!(index.contains("## Daily New Cases (3-Day Avg)"));
        assert!(!index.contains("7-Day Avg"));
    }

    #[test]
    fn test_unknown_location_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut dashboard = dashboard(dir.path());

        let err = dashboard.select_names(&["Atlantis"]).unwrap_err();

        assert!(matches!(err, DashboardError::InvalidConfig(_)));
        assert_eq!(dashboard.selection().len(), 3);
    }
}
