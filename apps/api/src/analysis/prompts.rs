// CV analysis prompt template.
// `{rules}` receives the shared Spanish/JSON-only block, `{cv_text}` the extracted CV.

pub const CV_ANALYSIS_PROMPT: &str = r#"Actúa como un analista senior de CVs para procesos de selección IT, con experiencia en ATS, reclutamiento técnico y evaluación de empleabilidad real.

{rules}
- No traduzcas ni inventes información que no esté explícita en el CV.
- Analiza solo el contenido presente en el CV proporcionado.
- No emitas opiniones personales ni suposiciones.

OBJETIVO:
Evaluar la calidad profesional del CV, su claridad, estructura, impacto y compatibilidad con procesos de selección automatizados (ATS), y proponer mejoras concretas basadas únicamente en lo que el CV contiene o no contiene.

ESTRUCTURA DE RESPUESTA (OBLIGATORIA Y EXACTA):

{
  "score": number,
  "category": "ELITE" | "SÓLIDO" | "MEJORABLE" | "CRÍTICO",
  "summary": string,
  "strengths": [string, string],
  "improvements": [string, string, string],
  "atsObservations": [string, string]
}

REGLAS PARA EL SCORE Y CATEGORÍA:
{scale_rules}

RESTRICCIONES CLAVE:
- No repitas frases del CV literalmente.
- No hagas sugerencias genéricas.
- No inventes experiencia, tecnologías o logros.
- Si falta información relevante, indícalo como mejora.
- Cada mejora debe ser clara, específica y aplicable.

CV A ANALIZAR:
"""
{cv_text}
"""
"#;

pub const HUNDRED_SCALE_RULES: &str = "\
- 90 a 100 → \"ELITE\"
- 75 a 89 → \"SÓLIDO\"
- 55 a 74 → \"MEJORABLE\"
- 0 a 54 → \"CRÍTICO\"";

pub const TEN_SCALE_RULES: &str = "\
- El score es un número del 1 al 10.
- 9 a 10 → \"ELITE\"
- 7.5 a 8.9 → \"SÓLIDO\"
- 5.5 a 7.4 → \"MEJORABLE\"
- 1 a 5.4 → \"CRÍTICO\"";
