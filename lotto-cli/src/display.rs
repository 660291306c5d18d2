use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use lotto_data::history::History;
use lotto_data::models::NumberStats;
use lotto_data::stats::{
    chi_square, decade_distribution, gap_distances, least_frequent, mean_sum_by_decade,
    most_frequent, parity_distribution, positional_means, repeat_distribution, sequence_summary,
    sum_summary, DECADE_LABELS,
};
use lotto_generator::entropy::{EntropyDigest, EntropyReport};
use lotto_generator::pipeline::FullRun;
use lotto_generator::scoring::{Rating, Score};
use lotto_generator::strategy::Strategy;
use lotto_generator::table::HotColdTable;

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

pub fn format_numbers(numbers: &[u8]) -> String {
    numbers
        .iter()
        .map(|n| format!("{:2}", n))
        .collect::<Vec<_>>()
        .join(" - ")
}

fn rating_color(rating: Rating) -> Color {
    match rating {
        Rating::Excellent => Color::Green,
        Rating::VeryGood => Color::Cyan,
        Rating::Good => Color::Yellow,
        Rating::Average => Color::Magenta,
        Rating::Weak => Color::Red,
    }
}

pub fn display_entropy(report: &EntropyReport) {
    println!("\n🔐 Źródła entropii\n");

    let mut table = new_table(vec!["Źródło", "Wartość", "Zastępcza"]);
    for sample in &report.samples {
        let fallback = if sample.fallback { "tak" } else { "—" };
        table.add_row(vec![sample.label.as_str(), sample.value.as_str(), fallback]);
    }
    println!("{table}");
    println!("Skrót SHA-256: {}", report.digest);
}

pub fn display_strategy(strategy: Strategy, forced: bool) {
    let how = if forced { "wybrana ręcznie" } else { "wybrana przez entropię" };
    println!("\n{} Strategia: {} ({})", strategy.icon(), strategy, how);
}

pub fn display_score(score: &Score) {
    println!("\n🎲 Twoje liczby: {}\n", format_numbers(&score.numbers));

    let runs = if score.runs.is_empty() {
        "brak".to_string()
    } else {
        score
            .runs
            .iter()
            .map(|(a, b)| format!("{}-{}", a, b))
            .collect::<Vec<_>>()
            .join(", ")
    };

    let mut table = new_table(vec!["Kryterium", "Wartość"]);
    table.add_row(vec!["Suma".to_string(), score.sum.to_string()]);
    table.add_row(vec![
        "Parzyste / nieparzyste".to_string(),
        format!("{} / {}", score.even_count, score.numbers.len() - score.even_count),
    ]);
    table.add_row(vec!["Sekwencje".to_string(), runs]);
    table.add_row(vec!["Liczby 41-49".to_string(), score.high_count.to_string()]);
    table.add_row(vec!["Liczby gorące".to_string(), score.hot_hits.to_string()]);
    table.add_row(vec![
        Cell::new("Ocena"),
        Cell::new(format!("{} ({} pkt)", score.rating, score.points)).fg(rating_color(score.rating)),
    ]);
    println!("{table}");
}

pub fn display_all(run: &FullRun) {
    println!("\n🎯 Wszystkie strategie\n");

    let mut table = new_table(vec!["#", "Strategia", "Liczby", "Suma", "P/N", "Ocena"]);
    for (i, candidate) in run.candidates.iter().enumerate() {
        let score = &candidate.score;
        let marker = if i == run.recommended { "⭐" } else { "" };
        table.add_row(vec![
            Cell::new(format!("{}{}", i + 1, marker)),
            Cell::new(format!("{} {}", candidate.strategy.icon(), candidate.strategy)),
            Cell::new(format_numbers(&score.numbers)),
            Cell::new(score.sum),
            Cell::new(format!("{}/{}", score.even_count, score.numbers.len() - score.even_count)),
            Cell::new(format!("{} ({})", score.rating, score.points)).fg(rating_color(score.rating)),
        ]);
    }
    println!("{table}");

    if let Some(best) = run.candidates.get(run.recommended) {
        println!(
            "\n⭐ Rekomendacja: {} → {} (suma {})",
            best.strategy,
            format_numbers(&best.score.numbers),
            best.score.sum
        );
    }

    let summary = &run.summary;
    let common = summary
        .most_common
        .iter()
        .map(|(n, c)| format!("{}×{}", n, c))
        .collect::<Vec<_>>()
        .join(", ");
    println!("\n📊 Podsumowanie");
    println!("  Najczęstsze liczby : {}", common);
    println!(
        "  Suma               : średnia {:.1}, min {}, max {}",
        summary.mean_sum, summary.min_sum, summary.max_sum
    );
}

pub fn display_digest_numbers(digest: &EntropyDigest) {
    println!("\n🎲 Liczby ze skrótu: {}", format_numbers(&digest.numbers()));
}

pub fn display_hot_cold(table: &HotColdTable) {
    println!("\n── Tabela liczb gorących i zimnych ──");
    let mut out = new_table(vec!["Lista", "Liczby"]);
    let rows: [(&str, &[u8], Color); 4] = [
        ("Gorące", table.hot(), Color::Red),
        ("Zimne", table.cold(), Color::Blue),
        ("Ostatnio gorące", table.recent_hot(), Color::Red),
        ("Ostatnio zimne", table.recent_cold(), Color::Blue),
    ];
    for (label, numbers, color) in rows {
        out.add_row(vec![Cell::new(label).fg(color), Cell::new(format_numbers(numbers))]);
    }
    println!("{out}");
}

pub fn display_history_summary(history: &History) {
    println!("\n📂 Historia losowań");
    println!("  Linie              : {}", history.total_lines);
    println!("  Poprawne losowania : {}", history.len());
    println!("  Pominięte          : {}", history.skipped);
    if let (Some(first), Some(last)) = (history.first_date(), history.last_date()) {
        println!("  Zakres dat         : {} → {}", first.format("%d.%m.%Y"), last.format("%d.%m.%Y"));
    }
}

fn display_frequency(title: &str, stats: &[NumberStats], numbers: &[u8]) {
    println!("\n── {} ──", title);
    let mut table = new_table(vec!["Liczba", "Wystąpienia", "Losowań temu"]);
    for &n in numbers {
        if let Some(stat) = stats.iter().find(|s| s.number == n) {
            table.add_row(vec![
                format!("{:2}", stat.number),
                stat.frequency.to_string(),
                stat.gap.to_string(),
            ]);
        }
    }
    println!("{table}");
}

fn percent(count: u32, total: usize) -> String {
    if total == 0 {
        return "—".to_string();
    }
    format!("{:.1}%", count as f64 * 100.0 / total as f64)
}

pub fn display_analysis(history: &History, stats: &[NumberStats], top: usize, recent: usize) {
    let draws = &history.draws;
    let total = draws.len();

    display_frequency("Najczęściej losowane", stats, &most_frequent(stats, top));
    display_frequency("Najrzadziej losowane", stats, &least_frequent(stats, top));

    if let Some(sums) = sum_summary(draws) {
        println!("\n── Sumy ──");
        println!(
            "  Średnia {:.1}, mediana {:.1}, odchylenie {:.1}, min {}, max {}",
            sums.mean, sums.median, sums.std_dev, sums.min, sums.max
        );
    }

    println!("\n── Parzyste w losowaniu ──");
    let mut table = new_table(vec!["Parzyste", "Losowania", "Udział"]);
    for (evens, &count) in parity_distribution(draws).iter().enumerate() {
        table.add_row(vec![evens.to_string(), count.to_string(), percent(count, total)]);
    }
    println!("{table}");

    println!("\n── Dziesiątki ──");
    let mut table = new_table(vec!["Zakres", "Wystąpienia", "Udział"]);
    let decades = decade_distribution(draws);
    let decade_total = decades.iter().sum::<u32>() as usize;
    for (label, &count) in DECADE_LABELS.iter().zip(decades.iter()) {
        table.add_row(vec![label.to_string(), count.to_string(), percent(count, decade_total)]);
    }
    println!("{table}");

    let seq = sequence_summary(draws);
    println!("\n── Sekwencje ──");
    println!("  Z parą kolejnych liczb   : {} ({})", seq.with_pair, percent(seq.with_pair, total));
    println!("  Z trójką kolejnych liczb : {} ({})", seq.with_triple, percent(seq.with_triple, total));
    println!("  Najdłuższa sekwencja     : {}", seq.longest);

    println!("\n── Powtórzenia z poprzedniego losowania ──");
    let repeats = repeat_distribution(draws);
    let pairs = total.saturating_sub(1);
    let mut table = new_table(vec!["Wspólne", "Losowania", "Udział"]);
    for (shared, &count) in repeats.iter().enumerate() {
        table.add_row(vec![shared.to_string(), count.to_string(), percent(count, pairs)]);
    }
    println!("{table}");

    let gaps = gap_distances(draws, top);
    if !gaps.is_empty() {
        let text = gaps
            .iter()
            .map(|(d, c)| format!("{}×{}", d, c))
            .collect::<Vec<_>>()
            .join(", ");
        println!("\n── Odstępy między sąsiednimi liczbami ──");
        println!("  {}", text);
    }

    let means = positional_means(draws);
    println!("\n── Średnia na pozycji ──");
    println!(
        "  {}",
        means.iter().map(|m| format!("{:.1}", m)).collect::<Vec<_>>().join(" | ")
    );

    let by_decade = mean_sum_by_decade(draws);
    if !by_decade.is_empty() {
        println!("\n── Średnia suma w dekadach ──");
        let mut table = new_table(vec!["Dekada", "Średnia suma"]);
        for (decade, mean) in by_decade {
            table.add_row(vec![format!("{}s", decade), format!("{:.1}", mean)]);
        }
        println!("{table}");
    }

    let chi = chi_square(stats, total);
    let verdict = if chi.uniform {
        Cell::new("zgodny z rozkładem równomiernym").fg(Color::Green)
    } else {
        Cell::new("odbiega od rozkładu równomiernego").fg(Color::Red)
    };
    println!("\n── Test chi-kwadrat ──");
    let mut table = new_table(vec!["χ²", "Stopnie swobody", "Wartość krytyczna (0,05)", "Wynik"]);
    table.add_row(vec![
        Cell::new(format!("{:.2}", chi.statistic)),
        Cell::new(chi.degrees_of_freedom),
        Cell::new(format!("{:.2}", chi.critical_005)),
        verdict,
    ]);
    println!("{table}");

    let window = history.recent(recent);
    if !window.is_empty() && window.len() < total {
        let recent_stats = lotto_data::stats::compute_stats(window);
        display_frequency(
            &format!("Najczęściej w ostatnich {} losowaniach", window.len()),
            &recent_stats,
            &most_frequent(&recent_stats, top),
        );
    }
}

pub fn display_disclaimer() {
    println!(
        "\n⚠️  Losowania są niezależne: ważenie liczb nie zwiększa szans na wygraną. \
         Graj odpowiedzialnie."
    );
}
