#[cfg(test)]
pub const ARTICLE_MD: &str = r#"---
title: "Meta lança Llama 3 com 70B parâmetros"
description: "A Meta liberou os pesos do Llama 3 em duas versões, 8B e 70B, com licença comercial."
pubDate: 2024-04-18
category: news
originalUrl: "https://ai.meta.com/blog/meta-llama-3/"
author: "AI Digest"
readingTime: "3 min"
tags: ["llm", "meta", "open-source"]
---

## Sobre

A Meta anunciou o Llama 3, nova geração da sua família de modelos abertos.

## Fonte Original

Este conteúdo foi curado automaticamente pelo AI Digest.
"#;

#[cfg(test)]
pub const ARTICLE_REPO_MD: &str = r#"---
title: "llama.cpp"
description: "Inference of LLaMA models in pure C/C++"
pubDate: 2024-05-02
category: repo
originalUrl: "https://github.com/ggerganov/llama.cpp"
tags: ["C++"]
---

## Sobre

Port of Facebook's LLaMA model in C/C++.
"#;

#[cfg(test)]
pub const ARTICLE_INVALID_MD: &str = r#"---
title: ""
description: "Generated without a source"
pubDate: 2024-04-20
category: blog
originalUrl: ""
---

Body.
"#;

#[cfg(test)]
pub const ARTICLE_NO_FRONT_MATTER: &str = "# Just a title

Some text without any metadata.
";
