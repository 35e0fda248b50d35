use regex::Regex;
use log::debug;

/// Line-level boilerplate filter for platform PDF exports
///
/// Each line is trimmed before matching; surviving lines are kept
/// untouched and rejoined with `\n` in their original order.
pub struct NoiseFilter {
    patterns: Vec<Regex>,
}

impl NoiseFilter {
    pub fn new() -> Self {
        let patterns = [
            // Browser print header: page URL
            r"^https://www\.reclameaqui\.com\.br/.*$",
            // Page counter, e.g. "3/12"
            r"^\d+/\d+$",
            // Print timestamp footer, e.g. "18/10/2024, 14:05"
            r"^\d{2}/\d{2}/\d{4},\s*\d{2}:\d{2}$",
            r"^Reclame Aqui - Pesquise antes de comprar\. Reclame\. Resolva$",
            r"^Gere relatórios personalizados.*$",
            r"^Responder$",
            r"^Sem avaliação$",
            r"^Não respondida$",
        ]
        .iter()
        .map(|pattern| Regex::new(pattern).expect("Invalid noise pattern"))
        .collect();

        Self { patterns }
    }

    /// True when the trimmed line is platform boilerplate
    pub fn is_noise(&self, line: &str) -> bool {
        let trimmed = line.trim();
        self.patterns.iter().any(|pattern| pattern.is_match(trimmed))
    }

    /// Drop every boilerplate line from `text`
    pub fn clean(&self, text: &str) -> String {
        let mut removed = 0usize;
        let kept: Vec<&str> = text
            .split('\n')
            .filter(|line| {
                let noise = self.is_noise(line);
                if noise {
                    removed += 1;
                }
                !noise
            })
            .collect();

        debug!("Noise filter removed {} lines, kept {}", removed, kept.len());
        kept.join("\n")
    }
}

impl Default for NoiseFilter {
    fn default() -> Self {
        Self::new()
    }
}
