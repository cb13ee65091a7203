// src/client/chart.rs

/// Gráficos são opcionais: quem não tem renderizador usa `NoopChart`.
pub trait ChartRenderer: Send + Sync {
    fn available(&self) -> bool;
    fn bar(&self, title: &str, labels: &[String], values: &[f64]);
    fn line(&self, title: &str, labels: &[String], values: &[f64]);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopChart;

impl ChartRenderer for NoopChart {
    fn available(&self) -> bool {
        false
    }

    fn bar(&self, _title: &str, _labels: &[String], _values: &[f64]) {}

    fn line(&self, _title: &str, _labels: &[String], _values: &[f64]) {}
}
