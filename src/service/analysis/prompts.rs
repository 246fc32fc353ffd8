//! Prompt construction and per-language phrase bundles
//!
//! Everything language-specific lives in a `LanguagePack`: prompt fragments,
//! the question/answer tag convention, unanswered-answer markers, lookup
//! sentinels, and placeholder strings. Adding a phrasing variant or a new
//! language is a data edit, not a code change.

use crate::model::Language;

/// Question tags recognized when splitting formatted question entries,
/// regardless of the request language.
pub const QUESTION_TAGS: &[&str] = &["Vraag", "Question", "Frage", "Pregunta"];

/// Answer tags recognized when splitting formatted question entries.
pub const ANSWER_TAGS: &[&str] = &["Antwoord", "Answer", "Antwort", "Respuesta"];

/// Language-specific phrase bundle
pub struct LanguagePack {
    pub code: &'static str,

    // Analysis prompt fragments
    pub system_preamble: &'static str,
    pub instruction: &'static str,
    pub claim_summary_field: &'static str,
    pub sources_field: &'static str,
    pub question_format: &'static str,
    pub impact_format: &'static str,
    pub language_instruction: &'static str,
    pub not_in_article: &'static str,

    // Question entry convention
    pub question_tag: &'static str,
    pub answer_tag: &'static str,
    pub online_info_prefix: &'static str,

    // Enrichment heuristics (markers are matched lowercase)
    pub unanswered_markers: &'static [&'static str],
    pub lookup_sentinels: &'static [&'static str],
    pub lookup_unavailable: &'static str,
    pub filler_phrases: &'static [&'static str],
    pub lookup_instruction: &'static str,
    pub lookup_directive: &'static str,

    // Validation defaults and placeholders
    pub unknown_question: &'static str,
    pub no_answer: &'static str,
    pub no_questions_placeholder: &'static str,
    pub no_impact_placeholder: &'static str,

    // Degraded fallback record
    pub degraded_summary: &'static str,
    pub degraded_question: &'static str,
    pub degraded_impact: &'static str,
}

impl LanguagePack {
    /// Canonical single-string form of a question/answer pair
    pub fn format_question(&self, question: &str, answer: &str) -> String {
        format!(
            "{}: {} | {}: {}",
            self.question_tag, question, self.answer_tag, answer
        )
    }

    /// Knowledge-lookup prompt for a single question
    pub fn lookup_prompt(&self, question: &str) -> String {
        format!(
            "{} \"{}\"\n\n{}",
            self.lookup_instruction, question, self.lookup_directive
        )
    }
}

static NL: LanguagePack = LanguagePack {
    code: "nl",
    system_preamble: "Je bent een kritische nieuwsanalist die helpt bij het verifiëren van claims en het identificeren van belangrijke vragen. Antwoord altijd in valide JSON formaat.",
    instruction: "Analyseer het volgende nieuwsartikel en geef een gestructureerde output in JSON formaat.",
    claim_summary_field: "Een korte, neutrale samenvatting van de hoofdclaim (max 3 zinnen) - leg afkortingen en technische termen uit, inclusief WHY en WHAT context",
    sources_field: "Relevante bron",
    question_format: "Vraag: De eerste kritische vraag | Antwoord: Het antwoord uit het artikel",
    impact_format: "Impact punt 1: korte beschrijving van een concrete impact",
    language_instruction: "Gebruik Nederlandse taal",
    not_in_article: "Niet vermeld in artikel",
    question_tag: "Vraag",
    answer_tag: "Antwoord",
    online_info_prefix: "Online informatie",
    unanswered_markers: &[
        "niet vermeld in artikel",
        "niet beantwoord",
        "geen informatie",
        "niet duidelijk",
    ],
    lookup_sentinels: &[
        "Geen betrouwbare informatie gevonden",
        "tijdelijk niet beschikbaar",
    ],
    lookup_unavailable: "Informatie tijdelijk niet beschikbaar",
    filler_phrases: &[
        "Deze vraag gaat over",
        "Het antwoord op deze vraag is",
        "Volgens mijn kennis",
        "Op basis van de informatie",
    ],
    lookup_instruction: "Beantwoord deze vraag zo volledig mogelijk:",
    lookup_directive: "Geef een informatief, feitelijk antwoord van maximaal 3 zinnen in het Nederlands. Focus op concrete feiten, cijfers, en praktische informatie. Formatteer je antwoord kort en bondig, zonder inleidende zinnen.",
    unknown_question: "Onbekende vraag",
    no_answer: "Geen antwoord",
    no_questions_placeholder: "Geen kritische vragen geïdentificeerd",
    no_impact_placeholder: "Geen duidelijke impact geïdentificeerd",
    degraded_summary: "Kon JSON niet verwerken - probeer opnieuw",
    degraded_question: "Fout bij verwerken van vragen",
    degraded_impact: "Fout bij verwerken van impact",
};

static EN: LanguagePack = LanguagePack {
    code: "en",
    system_preamble: "You are a critical news analyst who helps verify claims and identify important questions. Always respond in valid JSON format.",
    instruction: "Analyze the following news article and provide a structured output in JSON format.",
    claim_summary_field: "A brief, neutral summary of the main claim (max 3 sentences) - explain abbreviations and technical terms, including WHY and WHAT context",
    sources_field: "Relevant source",
    question_format: "Question: The first critical question | Answer: The answer from the article",
    impact_format: "Impact point 1: brief description of a concrete impact",
    language_instruction: "Use English language",
    not_in_article: "Not mentioned in article",
    question_tag: "Question",
    answer_tag: "Answer",
    online_info_prefix: "Online information",
    unanswered_markers: &[
        "not mentioned in article",
        "not answered",
        "no information",
        "not clear",
    ],
    lookup_sentinels: &["No reliable information found", "temporarily unavailable"],
    lookup_unavailable: "Information temporarily unavailable",
    filler_phrases: &[
        "This question is about",
        "The answer to this question is",
        "According to my knowledge",
        "Based on the information",
    ],
    lookup_instruction: "Answer this question as completely as possible:",
    lookup_directive: "Provide an informative, factual answer of maximum 3 sentences in English. Focus on concrete facts, figures, and practical information. Format your answer concisely, without introductory sentences.",
    unknown_question: "Unknown question",
    no_answer: "No answer",
    no_questions_placeholder: "No critical questions identified",
    no_impact_placeholder: "No clear impact identified",
    degraded_summary: "Could not process the model output - please try again",
    degraded_question: "Error while processing questions",
    degraded_impact: "Error while processing impact points",
};

static DE: LanguagePack = LanguagePack {
    code: "de",
    system_preamble: "Sie sind ein kritischer Nachrichtenanalyst, der beim Verifizieren von Behauptungen und Identifizieren wichtiger Fragen hilft. Antworten Sie immer im validen JSON-Format.",
    instruction: "Analysieren Sie den folgenden Nachrichtenartikel und geben Sie eine strukturierte Ausgabe im JSON-Format.",
    claim_summary_field: "Eine kurze, neutrale Zusammenfassung der Hauptbehauptung (max 3 Sätze) - erklären Sie Abkürzungen und Fachbegriffe, einschließlich WARUM und WAS Kontext",
    sources_field: "Relevante Quelle",
    question_format: "Frage: Die erste kritische Frage | Antwort: Die Antwort aus dem Artikel",
    impact_format: "Auswirkungspunkt 1: kurze Beschreibung einer konkreten Auswirkung",
    language_instruction: "Verwenden Sie deutsche Sprache",
    not_in_article: "Nicht im Artikel erwähnt",
    question_tag: "Frage",
    answer_tag: "Antwort",
    online_info_prefix: "Online-Informationen",
    unanswered_markers: &[
        "nicht im artikel erwähnt",
        "nicht beantwortet",
        "keine informationen",
        "nicht klar",
    ],
    lookup_sentinels: &[
        "Keine zuverlässigen Informationen gefunden",
        "vorübergehend nicht verfügbar",
    ],
    lookup_unavailable: "Informationen vorübergehend nicht verfügbar",
    filler_phrases: &[
        "Diese Frage betrifft",
        "Die Antwort auf diese Frage ist",
        "Nach meinem Kenntnisstand",
        "Auf Grundlage der Informationen",
    ],
    lookup_instruction: "Beantworten Sie diese Frage so vollständig wie möglich:",
    lookup_directive: "Geben Sie eine informative, sachliche Antwort von maximal 3 Sätzen auf Deutsch. Konzentrieren Sie sich auf konkrete Fakten, Zahlen und praktische Informationen. Formatieren Sie Ihre Antwort prägnant, ohne einleitende Sätze.",
    unknown_question: "Unbekannte Frage",
    no_answer: "Keine Antwort",
    no_questions_placeholder: "Keine kritischen Fragen identifiziert",
    no_impact_placeholder: "Keine eindeutigen Auswirkungen identifiziert",
    degraded_summary: "Modellausgabe konnte nicht verarbeitet werden - bitte erneut versuchen",
    degraded_question: "Fehler bei der Verarbeitung der Fragen",
    degraded_impact: "Fehler bei der Verarbeitung der Auswirkungen",
};

static ES: LanguagePack = LanguagePack {
    code: "es",
    system_preamble: "Eres un analista de noticias crítico que ayuda a verificar afirmaciones e identificar preguntas importantes. Responde siempre en formato JSON válido.",
    instruction: "Analiza el siguiente artículo de noticias y proporciona una salida estructurada en formato JSON.",
    claim_summary_field: "Un resumen breve y neutral de la afirmación principal (máx 3 oraciones) - explica abreviaciones y términos técnicos, incluyendo contexto de POR QUÉ y QUÉ",
    sources_field: "Fuente relevante",
    question_format: "Pregunta: La primera pregunta crítica | Respuesta: La respuesta del artículo",
    impact_format: "Punto de impacto 1: breve descripción de un impacto concreto",
    language_instruction: "Usa idioma español",
    not_in_article: "No mencionado en el artículo",
    question_tag: "Pregunta",
    answer_tag: "Respuesta",
    online_info_prefix: "Información en línea",
    unanswered_markers: &[
        "no mencionado en el artículo",
        "sin respuesta",
        "no hay información",
        "no está claro",
    ],
    lookup_sentinels: &[
        "No se encontró información fiable",
        "temporalmente no disponible",
    ],
    lookup_unavailable: "Información temporalmente no disponible",
    filler_phrases: &[
        "Esta pregunta trata sobre",
        "La respuesta a esta pregunta es",
        "Según mis conocimientos",
        "Con base en la información",
    ],
    lookup_instruction: "Responde a esta pregunta lo más completamente posible:",
    lookup_directive: "Proporciona una respuesta informativa y fáctica de máximo 3 oraciones en español. Enfócate en hechos concretos, cifras e información práctica. Formatea tu respuesta de manera concisa, sin oraciones introductorias.",
    unknown_question: "Pregunta desconocida",
    no_answer: "Sin respuesta",
    no_questions_placeholder: "No se identificaron preguntas críticas",
    no_impact_placeholder: "No se identificó un impacto claro",
    degraded_summary: "No se pudo procesar la salida del modelo - inténtalo de nuevo",
    degraded_question: "Error al procesar las preguntas",
    degraded_impact: "Error al procesar el impacto",
};

/// Phrase bundle for the requested language
pub fn pack_for(language: Language) -> &'static LanguagePack {
    match language {
        Language::Nl => &NL,
        Language::En => &EN,
        Language::De => &DE,
        Language::Es => &ES,
    }
}

/// Build the primary analysis prompt for an article.
///
/// The template mandates strict JSON, an array-of-strings shape for
/// critical_questions, and best-effort answers with full context.
pub fn build_analysis_prompt(title: &str, text: &str, pack: &LanguagePack) -> String {
    format!(
        r#"{preamble}

{instruction}

Title: {title}

Text: {text}

Provide the output in exactly the following JSON format:
{{
    "claim_summary": "{claim_summary_field}",
    "critical_questions": [
        "{question_format}",
        "{qtag}: Second critical question | {atag}: Answer from article",
        "{qtag}: Third critical question | {atag}: Answer from article"
    ],
    "impact_summary": [
        "{impact_1}",
        "{impact_2}",
        "{impact_3}"
    ],
    "sources": [
        {{"title": "{sources_field} 1", "url": "https://example.com"}},
        {{"title": "{sources_field} 2", "url": "https://example.com"}}
    ]
}}

Instructions:
1. Be critical and objective
2. Focus on verifiable facts and data
3. Ask questions that help with fact-checking AND answer them with available info
4. Impact points must be concrete and measurable
5. Sources must really exist and be relevant
6. {language_instruction}
7. IMPORTANT: Explain all abbreviations, technical terms and jargon so an ordinary reader understands them
8. Framework for complete context (ESSENTIAL):
   - For events: explain WHAT exactly happened
   - For decisions: explain WHY the decision was taken
   - For controversies: explain WHAT was said or done that caused the controversy
   - For sanctions or penalties: explain the SPECIFIC behavior that led to the penalty
   - For conflicts: explain the CONCRETE trigger and what both sides claim
9. Framework for question-and-answer (IMPORTANT):
   - Ask relevant critical questions that readers would have
   - Answer each question as completely as possible with info from the article
   - If exact info is not available, give context or related info from the article
   - If the article truly contains no relevant info, use '{not_in_article}'
   - Always try to give a usable answer based on available context
10. Respond ONLY with valid JSON, no extra text
11. IMPORTANT: critical_questions must be an array of strings, NOT objects!"#,
        preamble = pack.system_preamble,
        instruction = pack.instruction,
        title = title,
        text = text,
        claim_summary_field = pack.claim_summary_field,
        question_format = pack.question_format,
        qtag = pack.question_tag,
        atag = pack.answer_tag,
        impact_1 = pack.impact_format,
        impact_2 = pack.impact_format.replace('1', "2"),
        impact_3 = pack.impact_format.replace('1', "3"),
        sources_field = pack.sources_field,
        language_instruction = pack.language_instruction,
        not_in_article = pack.not_in_article,
    )
}
