/// Collège de Montréal teaching staff, loaded into an empty directory on first start.
pub const TEACHER_ROSTER: &[(&str, &str)] = &[
    // Département des Arts
    ("Julie Beaulé", "Arts"),
    ("Rémi Bolduc", "Arts"),
    ("Marilyse Chaussée", "Arts"),
    ("Emmanuelle Cloutier-Carrier", "Arts"),
    ("Vanessa Gagnon", "Arts"),
    ("Lara Bénédicte Griscelli", "Arts"),
    ("Odette Lalonde", "Arts"),
    ("Florianne Lauzon Loyer", "Arts"),
    ("Pascal Palomino", "Arts"),
    ("Julie Reydellet", "Arts"),
    ("Annick Terral", "Arts"),
    // Département d'Anglais et Espagnol
    ("Jade Boily", "Anglais et Espagnol"),
    ("Dominique Calma", "Anglais et Espagnol"),
    ("Austin Denham", "Anglais et Espagnol"),
    ("Veronica Freeman", "Anglais et Espagnol"),
    ("Farhin Hassan", "Anglais et Espagnol"),
    ("Elena Marcovecchio", "Anglais et Espagnol"),
    ("Rosemary McConnell", "Anglais et Espagnol"),
    ("Kyla Sedore", "Anglais et Espagnol"),
    ("Bruce Tunney", "Anglais et Espagnol"),
    ("Ian Wilbur", "Anglais et Espagnol"),
    // Département d'Éducation Physique
    ("Amélie Francoeur", "Éducation Physique"),
    ("Mathieu Lacombe", "Éducation Physique"),
    ("Jean-François Lalonde", "Éducation Physique"),
    ("Éric Namts", "Éducation Physique"),
    ("Marie-Odile Racon", "Éducation Physique"),
    ("Julien Rochon-Bourassa", "Éducation Physique"),
    // Département de Culture et Citoyenneté Québécoise
    ("Luc Bergeron", "Culture et Citoyenneté Québécoise"),
    ("Dominique Dominique", "Culture et Citoyenneté Québécoise"),
    ("Marcia Duranceau", "Culture et Citoyenneté Québécoise"),
    ("David Palin-Montpetit", "Culture et Citoyenneté Québécoise"),
    ("Sean Penner", "Culture et Citoyenneté Québécoise"),
    ("Benjamin Picaud", "Culture et Citoyenneté Québécoise"),
    // Département de Français
    ("David Boudreault-Désiré", "Français"),
    ("Gwladys Breault", "Français"),
    ("Marie-Joëlle Champagne", "Français"),
    ("Gabrielle Comtois", "Français"),
    ("Justine Duguay", "Français"),
    ("Marcia Duranceau", "Français"),
    ("Marc-André Forget", "Français"),
    ("Andrée Goulet-Jobin", "Français"),
    ("Marie-Noël Lanthier", "Français"),
    ("Kitrie Marin-Auger", "Français"),
    ("Marie-Ève Miville-Deschênes", "Français"),
    ("Jade Robichaud-Laurin", "Français"),
    ("Christine Saurette", "Français"),
    ("Jasmine Soulignac", "Français"),
    ("Valérie Tremblay", "Français"),
    // Département de Mathématique
    ("Simona Carmen Anescu", "Mathématique"),
    ("Raphaël Bellavance Ménard", "Mathématique"),
    ("Jean-Yves Boulais", "Mathématique"),
    ("Boris Clain", "Mathématique"),
    ("Danny Dallaire", "Mathématique"),
    ("Stéphane Laplante", "Mathématique"),
    ("Yuliya Pokhil", "Mathématique"),
    ("Audrey Purcell St-Michel", "Mathématique"),
    ("Léanne Robitaille", "Mathématique"),
    ("Régent Jr Roy", "Mathématique"),
    ("Khaled Taibi", "Mathématique"),
    ("Maude Tétrault", "Mathématique"),
    ("Audrey Zielinski", "Mathématique"),
    // Département des Sciences et Technologies
    ("Valérie Baldacchino", "Sciences et Technologies"),
    ("Jean-Sébastien Beaulieu", "Sciences et Technologies"),
    ("Olivier Bourque", "Sciences et Technologies"),
    ("Karène Brindle", "Sciences et Technologies"),
    ("Maxime Brisbois", "Sciences et Technologies"),
    ("Antoine Buscarlet", "Sciences et Technologies"),
    ("Yannick Cyr", "Sciences et Technologies"),
    ("Amélia Darsigny", "Sciences et Technologies"),
    ("Odrey Dufort", "Sciences et Technologies"),
    ("Éloïse Massé", "Sciences et Technologies"),
    ("Anne-Marie Talbot-Fournier", "Sciences et Technologies"),
    ("Marc Vendette", "Sciences et Technologies"),
    ("Audrey Zielinski", "Sciences et Technologies"),
    // Département de l'Univers Social
    ("Benjamin Astresses", "Univers Social"),
    ("Christopher Atkins", "Univers Social"),
    ("Antoine Basque", "Univers Social"),
    ("Jeffrey Brown-Pagé", "Univers Social"),
    ("Isabelle Casademont", "Univers Social"),
    ("Jean-Sébastien Cotnoir", "Univers Social"),
    ("Olivia Farley", "Univers Social"),
    ("Sylvain Larose", "Univers Social"),
    ("Benjamin Picaud", "Univers Social"),
    ("Geneviève Quirion-Hardy", "Univers Social"),
    ("Razmik Varoujean", "Univers Social"),
];
