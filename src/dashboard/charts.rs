//! Chart generation and rendering for the dashboard.
//!
//! The shift-distribution pie chart is generated as JSON configuration for
//! the ECharts library and rendered with an HTML container and JavaScript
//! initialization code.

use std::collections::HashMap;

use charming::{
    Chart,
    component::{Legend, Title},
    element::{Tooltip, Trigger},
    series::Pie,
};
use maud::{Markup, PreEscaped, html};

use crate::html::HeadElement;

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Renders the HTML containers for dashboard charts.
pub(super) fn charts_view(charts: &[DashboardChart]) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 gap-4"
            {
                @for chart in charts {
                    div
                        id=(chart.id)
                        class="min-h-[380px] rounded dark:bg-gray-100"
                    {}
                }
            }
        }
    )
}

/// Generates JavaScript initialization code for dashboard charts.
///
/// Creates scripts that initialize ECharts instances with dark mode support
/// and responsive resizing.
pub(super) fn charts_script(charts: &[DashboardChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{}\n}});",
        script_content
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

/// Build the pie chart showing how many students attend each shift.
///
/// Slices are sorted by shift name so the legend order is stable between
/// page loads.
pub(super) fn shift_distribution_chart(distribution: &HashMap<String, usize>) -> Chart {
    let mut slices: Vec<(&String, &usize)> = distribution.iter().collect();
    slices.sort_by(|left, right| left.0.cmp(right.0));

    let data: Vec<(f64, &str)> = slices
        .into_iter()
        .map(|(shift, count)| (*count as f64, shift.as_str()))
        .collect();

    Chart::new()
        .title(Title::new().text("Student Distribution by Shift"))
        .tooltip(Tooltip::new().trigger(Trigger::Item))
        .legend(Legend::new().top("bottom"))
        .series(Pie::new().name("Shift").radius("60%").data(data))
}

#[cfg(test)]
mod chart_tests {
    use std::collections::HashMap;

    use super::shift_distribution_chart;

    #[test]
    fn chart_options_contain_every_shift() {
        let distribution: HashMap<String, usize> = [
            ("Morning".to_owned(), 3),
            ("Evening".to_owned(), 2),
            ("Unknown".to_owned(), 1),
        ]
        .into();

        let options = shift_distribution_chart(&distribution).to_string();

        for shift in ["Morning", "Evening", "Unknown"] {
            assert!(options.contains(shift), "want {shift} in chart options");
        }
    }

    #[test]
    fn chart_slices_are_sorted_by_shift_name() {
        let distribution: HashMap<String, usize> =
            [("Zebra".to_owned(), 1), ("Alpha".to_owned(), 1)].into();

        let options = shift_distribution_chart(&distribution).to_string();

        let alpha_position = options.find("Alpha").unwrap();
        let zebra_position = options.find("Zebra").unwrap();
        assert!(
            alpha_position < zebra_position,
            "want slices sorted by name"
        );
    }
}
