//! Canned stage output used when no model credential is configured.
//!
//! Each fixture is shaped like a well-behaved model answer so the whole
//! pipeline (and its parsers) runs end to end offline.

pub const SCOUT: &str = "\
- AI is transforming entry-level jobs: Employers automate routine tasks and expect juniors to work alongside AI tools (https://www.weforum.org/reports/the-future-of-jobs-report-2025/)
- Soft skills are crucial for 2025: Communication, adaptability and critical thinking top recruiter wish lists (https://www.linkedin.com/business/talent/blog/talent-strategy/most-in-demand-skills)
- Remote work is here to stay: Hybrid roles remain common for digital and customer-facing jobs (https://www.oecd.org/employment/)";

pub const CURATOR: &str = r#"[
  {
    "postType": "ig_carousel",
    "mainMessage": "La IA no te quita el primer empleo: cambia lo que se espera de ti",
    "objective": "Educar",
    "targetAudience": "youth"
  },
  {
    "postType": "ig_post",
    "mainMessage": "Las habilidades blandas que más piden las empresas en 2025",
    "objective": "Inspirar",
    "targetAudience": "youth"
  },
  {
    "postType": "story_snippet",
    "mainMessage": "Trabajo remoto: cómo prepararte desde el aula",
    "objective": "Informar",
    "targetAudience": "teachers"
  }
]"#;

pub const EDITOR: &str = r#"{
  "slides": [
    { "id": 1, "role": "hook", "text": "¿Miedo a que la IA te quite tu primer trabajo?" },
    { "id": 2, "role": "context", "text": "Las tareas repetitivas se automatizan cada vez más." },
    { "id": 3, "role": "insight", "text": "Las empresas buscan juniors que sepan trabajar con IA." },
    { "id": 4, "role": "example", "text": "Usa un asistente para preparar tu CV y revísalo tú." },
    { "id": 5, "role": "cta", "text": "Guarda este post y compártelo con quien busca empleo." }
  ],
  "caption": "La IA cambia las reglas del primer empleo. Te contamos cómo adelantarte."
}"#;

pub const VISUAL: &str = r#"{
  "prompts": [
    { "forSlide": 1, "description": "Young student facing a friendly robot across a desk, flat illustration, teal and coral palette" },
    { "forSlide": 3, "description": "Laptop screen with an AI assistant panel, clean modern UI, soft shadows" },
    { "forSlide": 5, "description": "Bookmark and share icons on a gradient background, minimal" }
  ],
  "asciiArt": "+----------------------+\n|  [hook]   ( o_o )    |\n|  IA + primer empleo  |\n|  >>> desliza >>>     |\n+----------------------+"
}"#;
