use super::fallback::{grouped, man_yen};
use super::{AdviceTone, AnalysisInput, CompletionRequest};
use crate::recommendation::domain::{FeatureTag, ScoredArea};

const NO_PREFERENCE: &str = "特になし";

const ANALYSIS_SYSTEM_PROMPT: &str = "あなたは親切で知識豊富な賃貸住宅アドバイザーです。";
const ANALYSIS_MAX_TOKENS: u32 = 500;

/// Area comments prompt; the model must answer with one JSON object.
pub fn area_advice_request(
    areas: &[ScoredArea],
    features: &[FeatureTag],
    tone: AdviceTone,
) -> CompletionRequest {
    CompletionRequest {
        system_prompt: area_system_prompt(&feature_names(features), tone),
        user_prompt: area_user_prompt(areas),
        json_output: true,
        max_tokens: None,
    }
}

/// Free-form income/rent analysis prompt for the quick-analyze page.
pub fn salary_analysis_request(input: &AnalysisInput) -> CompletionRequest {
    let income = if input.is_student {
        format!("予算: {}円", grouped(input.budget.unwrap_or_default()))
    } else {
        format!("月収: {}円", grouped(input.salary.unwrap_or_default()))
    };

    let user_prompt = format!(
        "\nあなたは賃貸住宅のアドバイザーです。以下の情報をもとに、ユーザーにアドバイスをしてください。\n\n\
         - {income}\n\
         - 推奨家賃: {}円\n\
         - おすすめエリア: {}\n\n\
         以下の形式で回答してください:\n\
         1. 現在の収入と家賃のバランスについての分析(2-3文)\n\
         2. おすすめエリアの特徴(2-3文)\n\
         3. 節約・収入アップのヒント(3つ、箇条書き)\n",
        grouped(input.recommended_rent as f64),
        input.areas.join("、"),
    );

    CompletionRequest {
        system_prompt: ANALYSIS_SYSTEM_PROMPT.to_string(),
        user_prompt,
        json_output: false,
        max_tokens: Some(ANALYSIS_MAX_TOKENS),
    }
}

fn feature_names(features: &[FeatureTag]) -> String {
    let names: Vec<&str> = features.iter().map(FeatureTag::label).collect();
    if names.is_empty() {
        NO_PREFERENCE.to_string()
    } else {
        names.join("、")
    }
}

fn area_system_prompt(feature_names: &str, tone: AdviceTone) -> String {
    match tone {
        AdviceTone::Student => format!(
            "あなたは学生や新社会人の初めての一人暮らしをサポートする、親身で頼れる先輩アドバイザーです。\n\
             ユーザーが入力したこだわり条件（{feature_names}）を深く考慮し、なぜこの街がユーザーに最適なのかを論理的かつ感情に訴えるように解説してください。\n\n\
             **回答のガイドライン:**\n\
             1. **各エリアの解説（150〜200文字程度）**:\n   \
             - 必ず「〜なので、あなたの〇〇という条件にぴったりです」という納得感のある理由を含めてください。\n   \
             - 「最寄駅から徒歩○分」という情報は無視し、代わりに**「新宿・渋谷・池袋・東京」などの主要ターミナル駅への電車でのアクセス時間の目安**（例：「新宿まで電車で約15分」）を必ず独自の知識で推定して記載してください。\n   \
             - 街の雰囲気や具体的な生活シーン（例：「駅前の西友で買い物して...」）が想像できる描写をしてください。\n\n\
             2. **総評・エリア比較（200文字程度）**:\n   \
             - 3つのエリアを比較し、「もし〇〇を重視するならA、××ならB」といった比較視点を提供してください。\n   \
             - 最後に先輩として背中を押すメッセージを添えてください。"
        ),
        AdviceTone::General => format!(
            "あなたはプロの不動産コンサルタントです。ユーザーの希望条件（{feature_names}）に基づき、提案されたエリアがなぜ最適なのかを具体的にプレゼンしてください。\n\n\
             **回答のガイドライン:**\n\
             1. **各エリアの解説（150〜200文字程度）**:\n   \
             - ユーザーの条件と街の特徴を結びつけ、「だからこの街がおすすめです」というロジックを明確にしてください。\n   \
             - 「最寄駅から徒歩○分」という情報は無視し、代わりに**「都心主要駅（新宿・渋谷・東京など）への電車での所要時間目安」**（例：「大手町まで直通20分」）を必ず独自の知識で推定して記載してください。\n   \
             - 具体的な施設名や通り名などを出し、プロならではの深い知識を披露してください。\n\n\
             2. **総評・エリア比較（200文字程度）**:\n   \
             - 3つのエリアの長所・短所を比較し、ライフスタイルごとの選び方をアドバイスしてください。"
        ),
    }
}

fn area_user_prompt(areas: &[ScoredArea]) -> String {
    let area_infos = areas
        .iter()
        .enumerate()
        .map(|(index, area)| {
            format!(
                "{}. {}{} (家賃相場: {}万円)\n特徴: {}",
                index + 1,
                area.prefecture,
                area.name,
                man_yen(area.average_rent),
                area.description
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "以下の3つのエリアが候補として挙がりました。\n\
         ガイドラインに従って、詳細なアドバイスを作成してください。\n\
         レスポンスはJSON形式で返してください。\n\
         キーは \"area1_comment\", \"area2_comment\", \"area3_comment\", \"summary\" としてください。\n\n\
         候補エリア情報:\n{area_infos}"
    )
}
