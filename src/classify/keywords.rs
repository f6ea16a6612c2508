//! Keyword lists and stopword sets
//!
//! The crawl-time list is flat and treated as one implicit category. The
//! offline list is grouped by named category; declaration order decides which
//! category wins when an article matches several.

use lazy_static::lazy_static;
use std::collections::HashSet;

/// Name of the implicit category used by the crawl-time classifier
pub const ENVIRONMENT_CATEGORY: &str = "Экология";

/// Value written when no category matches
pub const NO_CATEGORY: &str = "No category";

/// Crawl-time keyword phrases
pub const ENVIRONMENT_KEYWORDS: &[&str] = &[
    "Экология",
    "Окружающая среда",
    "Природа",
    "Экосистема",
    "Экологическое состояние",
    "Природные ресурсы",
    "Биоразнообразие",
    "Экологическая политика",
    "Экологический кризис",
    "Сохранение природы",
    "Энвайронментализм",
    "Устойчивое развитие",
    "Зеленая экономика",
];

/// Category keyword phrases for offline re-classification
pub const CATEGORY_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "Экология",
        &[
            "Экология",
            "Окружающая среда",
            "Природа",
            "Экосистема",
            "Экологический кризис",
            "Энвайронментализм",
        ],
    ),
    (
        "Климат",
        &[
            "Климат",
            "Потепление",
            "Парниковые газы",
            "Углеродный след",
            "Засуха",
        ],
    ),
    (
        "Загрязнение",
        &[
            "Загрязнение",
            "Выбросы",
            "Отходы",
            "Мусор",
            "Свалка",
            "Смог",
        ],
    ),
    (
        "Энергетика",
        &[
            "Возобновляемая энергетика",
            "Солнечная энергия",
            "Ветроэнергетика",
            "Электромобиль",
        ],
    ),
    (
        "Биоразнообразие",
        &[
            "Биоразнообразие",
            "Заповедник",
            "Нацпарк",
            "Браконьерство",
            "Краснокнижный",
        ],
    ),
];

/// Russian stopwords applied before stemming by the offline classifier
pub const RUSSIAN_STOPWORDS: &[&str] = &[
    "и", "в", "во", "не", "что", "он", "на", "я", "с", "со", "как", "а", "то", "все", "она",
    "так", "его", "но", "да", "ты", "к", "у", "же", "вы", "за", "бы", "по", "только", "ее",
    "мне", "было", "вот", "от", "меня", "еще", "нет", "о", "из", "ему", "теперь", "когда",
    "даже", "ну", "вдруг", "ли", "если", "уже", "или", "ни", "быть", "был", "него", "до",
    "вас", "нибудь", "опять", "уж", "вам", "ведь", "там", "потом", "себя", "ничего", "ей",
    "может", "они", "тут", "где", "есть", "надо", "ней", "для", "мы", "тебя", "их", "чем",
    "была", "сам", "чтоб", "без", "будто", "чего", "раз", "тоже", "себе", "под", "будет",
    "ж", "тогда", "кто", "этот", "того", "потому", "этого", "какой", "совсем", "ним",
    "здесь", "этом", "один", "почти", "мой", "тем", "чтобы", "нее", "сейчас", "были",
    "куда", "зачем", "всех", "никогда", "можно", "при", "наконец", "два", "об", "другой",
    "хоть", "после", "над", "больше", "тот", "через", "эти", "нас", "про", "всего", "них",
    "какая", "много", "разве", "три", "эту", "моя", "впрочем", "хорошо", "свою", "этой",
    "перед", "иногда", "лучше", "чуть", "том", "нельзя", "такой", "им", "более", "всегда",
    "конечно", "всю", "между",
];

/// Extra words dropped from the word-frequency visualization only
pub const BUBBLE_STOPWORDS: &[&str] = &[
    "это", "также", "года", "году", "год", "лет", "которые", "который", "которая",
    "которых", "словам", "ранее", "время", "тасс", "риа", "новости", "сообщил",
    "сообщила", "заявил", "отметил", "рассказал", "рублей", "россии", "очень", "своей",
    "своих", "этом", "этих", "пока", "однако", "кроме",
];

lazy_static! {
    static ref RUSSIAN_STOPWORD_SET: HashSet<&'static str> =
        RUSSIAN_STOPWORDS.iter().copied().collect();
    static ref BUBBLE_STOPWORD_SET: HashSet<&'static str> =
        BUBBLE_STOPWORDS.iter().copied().collect();
}

/// Shared stopword set built from [`RUSSIAN_STOPWORDS`]
pub fn russian_stopwords() -> &'static HashSet<&'static str> {
    &RUSSIAN_STOPWORD_SET
}

/// Shared stopword set built from [`BUBBLE_STOPWORDS`]
pub fn bubble_stopwords() -> &'static HashSet<&'static str> {
    &BUBBLE_STOPWORD_SET
}

/// Ordered category → phrase list mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordSet {
    categories: Vec<(String, Vec<String>)>,
}

impl KeywordSet {
    /// A single implicit category holding a flat phrase list
    pub fn flat(category: &str, phrases: &[&str]) -> Self {
        Self {
            categories: vec![(
                category.to_string(),
                phrases.iter().map(|p| (*p).to_string()).collect(),
            )],
        }
    }

    /// Build from `(category, phrases)` pairs, keeping their order
    pub fn from_categories(entries: &[(&str, &[&str])]) -> Self {
        Self {
            categories: entries
                .iter()
                .map(|(name, phrases)| {
                    (
                        (*name).to_string(),
                        phrases.iter().map(|p| (*p).to_string()).collect(),
                    )
                })
                .collect(),
        }
    }

    /// Crawl-time environment list
    pub fn environment() -> Self {
        Self::flat(ENVIRONMENT_CATEGORY, ENVIRONMENT_KEYWORDS)
    }

    /// Offline category list
    pub fn categorized() -> Self {
        Self::from_categories(CATEGORY_KEYWORDS)
    }

    pub fn categories(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.categories
            .iter()
            .map(|(name, phrases)| (name.as_str(), phrases.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
