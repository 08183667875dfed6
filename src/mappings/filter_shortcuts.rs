/// Сокращения командной строки для фильтров ffplay
/// Отвечает за трансляцию флагов вида `-grey` в аргументы `-vf ...`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterShortcut {
    Grey,
    Sepia,
    Contrast,
    Gamma,
}

const GREY_MIXER: &str = "colorchannelmixer=.3:.4:.3:0:.3:.4:.3:0:.3:.4:.3";
const SEPIA_MIXER: &str = "colorchannelmixer=.393:.769:.189:0:.349:.686:.168:0:.272:.534:.131";

impl FilterShortcut {
    /// Распознать флаг (регистронезависимо)
    pub fn parse(flag: &str) -> Option<Self> {
        let normalized = flag.to_lowercase();
        let shortcut = match normalized.as_str() {
            "-grey" => Self::Grey,
            "-sepia" => Self::Sepia,
            "-contrast" => Self::Contrast,
            "-gamma" => Self::Gamma,
            _ => return None,
        };
        Some(shortcut)
    }

    pub fn takes_value(&self) -> bool {
        matches!(self, Self::Contrast | Self::Gamma)
    }

    /// Развернуть сокращение в аргументы плеера.
    /// Для `-contrast`/`-gamma` значение нормализуется через [`normalize_value`].
    pub fn expand(&self, value: Option<&str>) -> Vec<String> {
        let filter = match self {
            Self::Grey => GREY_MIXER.to_string(),
            Self::Sepia => SEPIA_MIXER.to_string(),
            Self::Contrast => {
                let v = normalize_value(value.unwrap_or_default());
                format!("colorlevels=rimin={v}:gimin={v}:bimin={v}")
            }
            Self::Gamma => {
                let v = normalize_value(value.unwrap_or_default());
                format!("eq=gamma={v}")
            }
        };
        vec!["-vf".to_string(), filter]
    }
}

/// Убрать незначащие нули числового значения.
///
/// Ведущие нули отбрасываются, но один ноль перед десятичной точкой остаётся;
/// у дробной части отбрасываются хвостовые нули, а затем и повисшая точка.
/// `0.90 -> 0.9`, `.120 -> .12`, `2.0 -> 2`, `10 -> 10`.
pub fn normalize_value(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        return String::new();
    }

    let (sign, digits) = match value.strip_prefix(['-', '+']) {
        Some(rest) => (&value[..1], rest),
        None => ("", value),
    };

    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (digits, None),
    };

    let int_trimmed = int_part.trim_start_matches('0');

    let normalized = match frac_part.map(|f| f.trim_end_matches('0')) {
        Some("") | None if int_trimmed.is_empty() => "0".to_string(),
        Some("") | None => int_trimmed.to_string(),
        Some(frac) => {
            // "0.9" сохраняет ноль, ".9" остаётся как есть
            let int_out = if int_trimmed.is_empty() && !int_part.is_empty() {
                "0"
            } else {
                int_trimmed
            };
            format!("{int_out}.{frac}")
        }
    };

    format!("{sign}{normalized}")
}
