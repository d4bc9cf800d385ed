use sha2::{Digest, Sha256};
use webaudit_domain::{Category, Issue, Severity};

use crate::audit_ports::RecommendationLocale;

/// Picks a canned recommendation for an issue.
///
/// The choice depends only on the issue's source key, category, severity and
/// the locale, so the same issue always gets the same text.
#[must_use]
pub fn fallback_recommendation(issue: &Issue, locale: RecommendationLocale) -> &'static str {
    let table = table(locale, issue.category(), issue.severity());
    let digest = Sha256::digest(issue.source_key().to_string().as_bytes());

    let mut prefix = [0_u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    let seed = u64::from_be_bytes(prefix);

    let index = usize::try_from(seed % table.len() as u64).unwrap_or_default();
    table[index]
}

fn table(
    locale: RecommendationLocale,
    category: Category,
    severity: Severity,
) -> &'static [&'static str; 5] {
    match (locale, category, severity) {
        (RecommendationLocale::Fr, Category::Seo, Severity::High) => &FRENCH_SEO_HIGH,
        (RecommendationLocale::Fr, Category::Seo, Severity::Medium) => &FRENCH_SEO_MEDIUM,
        (RecommendationLocale::Fr, Category::Seo, Severity::Low) => &FRENCH_SEO_LOW,
        (RecommendationLocale::Fr, Category::Performance, Severity::High) => &FRENCH_PERFORMANCE_HIGH,
        (RecommendationLocale::Fr, Category::Performance, Severity::Medium) => {
            &FRENCH_PERFORMANCE_MEDIUM
        }
        (RecommendationLocale::Fr, Category::Performance, Severity::Low) => &FRENCH_PERFORMANCE_LOW,
        (RecommendationLocale::Fr, Category::UiUx, Severity::High) => &FRENCH_UI_UX_HIGH,
        (RecommendationLocale::Fr, Category::UiUx, Severity::Medium) => &FRENCH_UI_UX_MEDIUM,
        (RecommendationLocale::Fr, Category::UiUx, Severity::Low) => &FRENCH_UI_UX_LOW,
        (RecommendationLocale::En, Category::Seo, Severity::High) => &ENGLISH_SEO_HIGH,
        (RecommendationLocale::En, Category::Seo, Severity::Medium) => &ENGLISH_SEO_MEDIUM,
        (RecommendationLocale::En, Category::Seo, Severity::Low) => &ENGLISH_SEO_LOW,
        (RecommendationLocale::En, Category::Performance, Severity::High) => &ENGLISH_PERFORMANCE_HIGH,
        (RecommendationLocale::En, Category::Performance, Severity::Medium) => {
            &ENGLISH_PERFORMANCE_MEDIUM
        }
        (RecommendationLocale::En, Category::Performance, Severity::Low) => &ENGLISH_PERFORMANCE_LOW,
        (RecommendationLocale::En, Category::UiUx, Severity::High) => &ENGLISH_UI_UX_HIGH,
        (RecommendationLocale::En, Category::UiUx, Severity::Medium) => &ENGLISH_UI_UX_MEDIUM,
        (RecommendationLocale::En, Category::UiUx, Severity::Low) => &ENGLISH_UI_UX_LOW,
    }
}

static FRENCH_SEO_HIGH: [&str; 5] = [
    "Ajoutez des balises meta description pertinentes contenant vos mots-clés principaux. Assurez-vous qu'elles soient entre 120 et 158 caractères pour optimiser leur visibilité dans les résultats de recherche.",
    "Intégrez des balises H1 appropriées avec vos mots-clés principaux. Structurez votre contenu avec des sous-titres H2 et H3 pour améliorer la lisibilité et le référencement.",
    "Corrigez les erreurs d'URL canoniques en implémentant des balises rel='canonical' cohérentes sur toutes vos pages. Cela évitera les problèmes de contenu dupliqué.",
    "Assurez-vous que tous vos liens sont en HTML standard plutôt qu'en JavaScript. Évitez d'utiliser onclick pour la navigation et préférez des balises <a href> traditionnelles pour une meilleure indexation.",
    "Vérifiez votre fichier robots.txt et supprimez toute directive bloquant l'accès aux pages importantes. Utilisez Google Search Console pour identifier les URL bloquées au crawling.",
];

static FRENCH_SEO_MEDIUM: [&str; 5] = [
    "Optimisez les attributs alt des images avec des descriptions pertinentes incluant vos mots-clés. Cela améliorera l'accessibilité et le référencement des images.",
    "Mettez en place un sitemap XML et soumettez-le aux moteurs de recherche. Assurez-vous qu'il soit à jour et comprenne toutes vos pages importantes.",
    "Améliorez la structure des URLs en utilisant des mots-clés pertinents et en évitant les paramètres inutiles. Préférez des URLs courtes et descriptives.",
    "Optimisez les titres de vos pages en incluant vos mots-clés principaux en début de titre, tout en maintenant une longueur inférieure à 60 caractères pour éviter la troncature dans les SERP.",
    "Implémentez des balises hreflang pour les sites multilingues afin d'indiquer aux moteurs de recherche quelle version linguistique afficher dans les résultats de recherche.",
];

static FRENCH_SEO_LOW: [&str; 5] = [
    "Ajoutez des données structurées (Schema.org) pour enrichir l'affichage de vos résultats dans les moteurs de recherche. Concentrez-vous sur les types pertinents pour votre activité.",
    "Optimisez le texte des liens internes avec des ancres descriptives contenant vos mots-clés secondaires. Évitez les ancres génériques comme 'cliquez ici'.",
    "Améliorez la longueur et la qualité de votre contenu en visant au moins 600 mots par page avec une densité de mots-clés optimale (2-3%).",
    "Ajoutez des attributs title aux liens importants pour fournir des informations supplémentaires aux utilisateurs et aux moteurs de recherche sur la destination du lien.",
    "Optimisez votre balise title en incluant votre mot-clé principal et votre marque. Maintenez une longueur entre 50 et 60 caractères pour une visibilité optimale dans les SERP.",
];

static FRENCH_PERFORMANCE_HIGH: [&str; 5] = [
    "Compressez et optimisez vos images en utilisant des formats modernes comme WebP et AVIF. Implémentez le lazy loading avec loading='lazy' pour les images sous la ligne de flottaison.",
    "Réduisez le temps de réponse initial du serveur en optimisant les requêtes de base de données, en augmentant les ressources serveur, ou en utilisant un CDN pour distribuer le contenu statique.",
    "Minimisez et compressez vos fichiers JavaScript avec Terser ou UglifyJS. Utilisez les attributs async ou defer pour éviter le blocage du rendu pendant le chargement des scripts.",
    "Éliminez les ressources bloquant le rendu en déplaçant les CSS critiques inline dans le <head> et en chargeant de manière asynchrone les styles non critiques avec loadCSS ou preload.",
    "Réduisez le temps d'exécution JavaScript en révisant votre code pour éliminer les opérations inutiles, optimiser les boucles, et éviter les reflows et repaints fréquents du DOM.",
];

static FRENCH_PERFORMANCE_MEDIUM: [&str; 5] = [
    "Réduisez le nombre de requêtes HTTP en regroupant vos fichiers CSS et JavaScript. Utilisez la concaténation pour limiter les appels au serveur.",
    "Optimisez le rendu critique en minimisant les CSS bloquants. Identifiez et intégrez les styles essentiels directement dans le HTML.",
    "Implémentez la compression GZIP ou Brotli sur votre serveur pour réduire la taille des fichiers transférés. Cela peut réduire jusqu'à 70% le volume de données.",
    "Utilisez HTTP/2 ou HTTP/3 pour permettre le multiplexage des requêtes sur une seule connexion, améliorant ainsi la vitesse de chargement des ressources multiples.",
    "Adoptez une stratégie de mise en cache efficace en configurant des en-têtes Cache-Control appropriés pour les ressources statiques, avec des TTL adaptés à la fréquence de mise à jour.",
];

static FRENCH_PERFORMANCE_LOW: [&str; 5] = [
    "Réduisez les redirections inutiles qui augmentent le temps de chargement. Chaque redirection ajoute un aller-retour supplémentaire au serveur.",
    "Optimisez le chargement des polices web en utilisant font-display:swap et en limitant le nombre de variantes. Considérez l'utilisation de polices système quand c'est possible.",
    "Implémentez le préchargement pour les ressources critiques avec <link rel='preload'>. Cela permettra au navigateur de les charger plus tôt dans le processus.",
    "Utilisez des solutions comme IntersectionObserver pour charger les contenus hors écran uniquement lorsqu'ils entrent dans le viewport, améliorant ainsi les performances perçues.",
    "Optimisez vos animations en utilisant uniquement les propriétés CSS qui déclenchent uniquement la composition (transform et opacity) pour éviter les repaints coûteux.",
];

static FRENCH_UI_UX_HIGH: [&str; 5] = [
    "Améliorez le contraste des couleurs pour garantir une meilleure lisibilité. Visez un ratio minimum de 4.5:1 pour le texte standard et 3:1 pour les grands textes conformément aux WCAG 2.1 AA.",
    "Ajoutez des attributs ARIA appropriés aux éléments interactifs non standard. Assurez-vous que tous les éléments sont accessibles au clavier et aux lecteurs d'écran en suivant les patterns ARIA établis.",
    "Structurez correctement vos formulaires avec des labels explicites associés à chaque champ via l'attribut for. Ajoutez des messages d'erreur clairs avec aria-describedby pour améliorer l'accessibilité.",
    "Assurez-vous que tous les éléments interactifs ont un nom accessible. Utilisez des textes descriptifs pour les boutons et ajoutez des attributs alt appropriés aux images cliquables.",
    "Implémentez une hiérarchie de titres logique et séquentielle (H1-H6) pour structurer votre contenu, facilitant la navigation pour les utilisateurs de lecteurs d'écran.",
];

static FRENCH_UI_UX_MEDIUM: [&str; 5] = [
    "Optimisez la navigation mobile avec des zones tactiles suffisamment grandes (minimum 44x44px). Évitez de placer les éléments cliquables trop près les uns des autres pour réduire les erreurs de toucher.",
    "Améliorez la hiérarchie visuelle de votre contenu pour guider l'œil de l'utilisateur. Utilisez la taille, la couleur et l'espacement pour établir l'importance relative des éléments.",
    "Implémentez des retours visuels clairs pour toutes les interactions (hover, focus, active). Les utilisateurs doivent toujours savoir où ils se trouvent et ce qui est cliquable.",
    "Assurez-vous que votre site est utilisable avec le clavier uniquement. Vérifiez que l'ordre de tabulation est logique et que l'indicateur de focus est clairement visible.",
    "Optimisez les formulaires en regroupant les champs connexes avec fieldset et legend, en fournissant des instructions claires, et en validant les données côté client avec feedback immédiat.",
];

static FRENCH_UI_UX_LOW: [&str; 5] = [
    "Ajoutez des animations subtiles pour améliorer l'expérience utilisateur, tout en respectant les préférences de réduction de mouvement (prefers-reduced-motion).",
    "Optimisez la lecture sur mobile en utilisant une taille de police d'au moins 16px et un interlignage suffisant (1.5). Évitez les longs paragraphes sans rupture.",
    "Améliorez la cohérence de votre interface en standardisant les composants UI comme les boutons, formulaires et cartes à travers tout votre site.",
    "Utilisez des microinteractions pour fournir un feedback sur les actions des utilisateurs, rendant l'interface plus engageante et informative sans surcharger l'expérience.",
    "Optimisez l'espacement et la densité d'information de votre interface en utilisant une grille cohérente et en respectant la loi de proximité pour regrouper visuellement les éléments liés.",
];

static ENGLISH_SEO_HIGH: [&str; 5] = [
    "Add relevant meta description tags containing your main keywords. Ensure they are between 120 and 158 characters to optimize their visibility in search results.",
    "Implement appropriate H1 tags with your main keywords. Structure your content with H2 and H3 subtitles to improve readability and SEO.",
    "Fix canonical URL errors by implementing consistent rel='canonical' tags across all your pages. This will prevent duplicate content issues.",
    "Ensure all your links are in standard HTML rather than JavaScript. Avoid using onclick for navigation and prefer traditional <a href> tags for better indexing.",
    "Check your robots.txt file and remove any directives blocking access to important pages. Use Google Search Console to identify URLs blocked from crawling.",
];

static ENGLISH_SEO_MEDIUM: [&str; 5] = [
    "Optimize image alt attributes with relevant descriptions including your keywords. This will improve both accessibility and image SEO.",
    "Set up an XML sitemap and submit it to search engines. Ensure it is up-to-date and includes all your important pages.",
    "Improve your URL structure by using relevant keywords and avoiding unnecessary parameters. Prefer short and descriptive URLs.",
    "Optimize your page titles by including your main keywords at the beginning, while maintaining a length under 60 characters to avoid truncation in SERPs.",
    "Implement hreflang tags for multilingual sites to indicate to search engines which language version to display in search results.",
];

static ENGLISH_SEO_LOW: [&str; 5] = [
    "Add structured data (Schema.org) to enrich the display of your results in search engines. Focus on the types relevant to your business.",
    "Optimize internal link text with descriptive anchors containing your secondary keywords. Avoid generic anchors like 'click here'.",
    "Improve the length and quality of your content by aiming for at least 600 words per page with an optimal keyword density (2-3%).",
    "Add title attributes to important links to provide additional information to users and search engines about the link destination.",
    "Optimize your title tag by including your main keyword and your brand. Maintain a length between 50 and 60 characters for optimal visibility in SERPs.",
];

static ENGLISH_PERFORMANCE_HIGH: [&str; 5] = [
    "Compress and optimize your images using modern formats like WebP and AVIF. Implement lazy loading with loading='lazy' for images below the fold.",
    "Reduce initial server response time by optimizing database queries, increasing server resources, or using a CDN to distribute static content.",
    "Minimize and compress your JavaScript files with Terser or UglifyJS. Use async or defer attributes to avoid render blocking during script loading.",
    "Eliminate render-blocking resources by moving critical CSS inline in the <head> and loading non-critical styles asynchronously with loadCSS or preload.",
    "Reduce JavaScript execution time by revising your code to eliminate unnecessary operations, optimize loops, and avoid frequent DOM reflows and repaints.",
];

static ENGLISH_PERFORMANCE_MEDIUM: [&str; 5] = [
    "Reduce the number of HTTP requests by bundling your CSS and JavaScript files. Use concatenation to limit server calls.",
    "Optimize critical rendering by minimizing blocking CSS. Identify and integrate essential styles directly in the HTML.",
    "Implement GZIP or Brotli compression on your server to reduce the size of transferred files. This can reduce data volume by up to 70%.",
    "Use HTTP/2 or HTTP/3 to allow multiplexing of requests on a single connection, improving the loading speed of multiple resources.",
    "Adopt an efficient caching strategy by configuring appropriate Cache-Control headers for static resources, with TTLs adapted to the update frequency.",
];

static ENGLISH_PERFORMANCE_LOW: [&str; 5] = [
    "Reduce unnecessary redirects that increase loading time. Each redirect adds an additional round trip to the server.",
    "Optimize web font loading by using font-display:swap and limiting the number of variants. Consider using system fonts when possible.",
    "Implement preloading for critical resources with <link rel='preload'>. This will allow the browser to load them earlier in the process.",
    "Use solutions like IntersectionObserver to load off-screen content only when it enters the viewport, thus improving perceived performance.",
    "Optimize your animations by using only CSS properties that trigger only composition (transform and opacity) to avoid costly repaints.",
];

static ENGLISH_UI_UX_HIGH: [&str; 5] = [
    "Improve color contrast to ensure better readability. Aim for a minimum ratio of 4.5:1 for standard text and 3:1 for large text in accordance with WCAG 2.1 AA.",
    "Add appropriate ARIA attributes to non-standard interactive elements. Ensure all elements are accessible via keyboard and screen readers by following established ARIA patterns.",
    "Properly structure your forms with explicit labels associated with each field via the for attribute. Add clear error messages with aria-describedby to improve accessibility.",
    "Ensure all interactive elements have an accessible name. Use descriptive text for buttons and add appropriate alt attributes to clickable images.",
    "Implement a logical and sequential heading hierarchy (H1-H6) to structure your content, facilitating navigation for screen reader users.",
];

static ENGLISH_UI_UX_MEDIUM: [&str; 5] = [
    "Optimize mobile navigation with sufficiently large touch targets (minimum 44x44px). Avoid placing clickable elements too close together to reduce touch errors.",
    "Improve the visual hierarchy of your content to guide the user's eye. Use size, color, and spacing to establish the relative importance of elements.",
    "Implement clear visual feedback for all interactions (hover, focus, active). Users should always know where they are and what is clickable.",
    "Ensure your site is usable with keyboard only. Check that the tab order is logical and that the focus indicator is clearly visible.",
    "Optimize forms by grouping related fields with fieldset and legend, providing clear instructions, and validating data client-side with immediate feedback.",
];

static ENGLISH_UI_UX_LOW: [&str; 5] = [
    "Add subtle animations to improve the user experience, while respecting motion reduction preferences (prefers-reduced-motion).",
    "Optimize mobile reading by using a font size of at least 16px and sufficient line height (1.5). Avoid long paragraphs without breaks.",
    "Improve the consistency of your interface by standardizing UI components such as buttons, forms, and cards across your site.",
    "Use microinteractions to provide feedback on user actions, making the interface more engaging and informative without overloading the experience.",
    "Optimize spacing and information density of your interface using a consistent grid and respecting the law of proximity to visually group related elements.",
];
